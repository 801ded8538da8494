//! Image normalization before submission.
//!
//! Caps the longer edge at [`MAX_EDGE`], drops any alpha channel, and
//! stages the result as a JPEG in a temporary file that is removed when
//! the [`NormalizedImage`] is dropped or closed.

use std::io::{self, BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::AcquireError;

/// Longest edge, in pixels, of an image sent for inference.
pub const MAX_EDGE: u32 = 800;

const JPEG_QUALITY: u8 = 90;

/// Target size for an image of `width` × `height`.
///
/// Returns `None` when both edges already fit. Otherwise the longer edge
/// becomes [`MAX_EDGE`] and the shorter one is scaled by the same factor,
/// rounded to the nearest pixel (at least 1).
pub fn target_dimensions(width: u32, height: u32) -> Option<(u32, u32)> {
    if width <= MAX_EDGE && height <= MAX_EDGE {
        return None;
    }
    let scale = |short: u32, long: u32| -> u32 {
        let scaled = (f64::from(short) * f64::from(MAX_EDGE) / f64::from(long)).round();
        (scaled as u32).max(1)
    };
    if width >= height {
        Some((MAX_EDGE, scale(height, width)))
    } else {
        Some((scale(width, height), MAX_EDGE))
    }
}

/// Convert to opaque RGB and downsize if needed.
pub fn normalize_image(image: DynamicImage) -> RgbImage {
    let (width, height) = (image.width(), image.height());
    let rgb = image.to_rgb8();
    match target_dimensions(width, height) {
        Some((w, h)) => {
            debug!(from_w = width, from_h = height, to_w = w, to_h = h, "resizing image");
            imageops::resize(&rgb, w, h, FilterType::Lanczos3)
        }
        None => rgb,
    }
}

/// A normalized image plus the temporary JPEG file holding it.
pub struct NormalizedImage {
    image: RgbImage,
    file: NamedTempFile,
}

impl NormalizedImage {
    /// Normalize `image` and stage it on disk.
    pub fn prepare(image: DynamicImage) -> Result<Self, AcquireError> {
        Self::stage(normalize_image(image))
    }

    /// Write an already-normalized image to a fresh temporary file.
    pub fn stage(image: RgbImage) -> Result<Self, AcquireError> {
        let mut file = tempfile::Builder::new()
            .prefix("ingrescan-")
            .suffix(".jpg")
            .tempfile()?;
        {
            let mut writer = BufWriter::new(file.as_file_mut());
            JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY).encode_image(&image)?;
            writer.flush()?;
        }
        debug!(
            path = %file.path().display(),
            width = image.width(),
            height = image.height(),
            "staged normalized image"
        );
        Ok(Self { image, file })
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Location of the staged JPEG. Valid until `self` is dropped.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the staged file, reporting any removal error.
    pub fn close(self) -> io::Result<()> {
        self.file.close()
    }
}
