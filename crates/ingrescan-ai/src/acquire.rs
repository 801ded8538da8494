//! Image acquisition from disk, memory, or (with `http`) a URL.

use std::path::Path;

use image::{DynamicImage, ImageReader};
use tracing::info;

use crate::error::AcquireError;

/// Open and decode an image file. The format is sniffed from content.
pub fn load_image(path: &Path) -> Result<DynamicImage, AcquireError> {
    if !path.exists() {
        return Err(AcquireError::NotFound(path.to_path_buf()));
    }
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "loaded image"
    );
    Ok(image)
}

/// Decode an in-memory encoded image.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, AcquireError> {
    Ok(image::load_from_memory(bytes)?)
}

/// Download an image over HTTP and decode it.
#[cfg(feature = "http")]
pub async fn fetch_image(client: &reqwest::Client, url: &str) -> Result<DynamicImage, AcquireError> {
    info!(url = %url, "fetching image");
    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(AcquireError::Server {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let bytes = resp.bytes().await?;
    info!(url = %url, bytes = bytes.len(), "fetched image");
    decode_image(&bytes)
}
