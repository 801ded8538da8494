//! Anthropic Messages API adapter for [`InferenceClient`].

use std::path::Path;

use base64::{Engine as _, engine::general_purpose};
use ingrescan_core::ImageRef;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::InferenceError;
use crate::inference::{InferenceClient, InferenceRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-20250219";
pub const DEFAULT_MAX_TOKENS: u32 = 2048;
const API_VERSION: &str = "2023-06-01";

/// HTTP client for the `/v1/messages` endpoint.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

// ── Wire types ──

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Image { source: ImageSource },
    Text { text: String },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ImageSource {
    Base64 { media_type: String, data: String },
    Url { url: String },
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

impl AnthropicClient {
    /// Create a client for `base_url` (e.g. `https://api.anthropic.com`, no
    /// trailing slash needed).
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn build_request(&self, request: InferenceRequest) -> Result<MessagesRequest, InferenceError> {
        let source = match request.image {
            ImageRef::Path(path) => {
                let bytes = tokio::fs::read(&path).await?;
                ImageSource::Base64 {
                    media_type: media_type(&path).to_string(),
                    data: general_purpose::STANDARD.encode(&bytes),
                }
            }
            ImageRef::Url(url) => ImageSource::Url { url },
        };

        Ok(MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            system: request.system_prompt,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentBlock::Image { source },
                    ContentBlock::Text {
                        text: request.instruction,
                    },
                ],
            }],
        })
    }
}

impl InferenceClient for AnthropicClient {
    async fn generate(&self, request: InferenceRequest) -> Result<String, InferenceError> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = self.build_request(request).await?;

        info!(url = %url, model = %self.model, "requesting analysis");
        let resp = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "inference request rejected");
            return Err(InferenceError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessagesResponse = serde_json::from_slice(&resp.bytes().await?)?;
        let text = join_text(parsed)?;
        info!(chars = text.len(), "analysis received");
        Ok(text)
    }
}

/// Concatenate the text blocks of a response.
fn join_text(resp: MessagesResponse) -> Result<String, InferenceError> {
    let text: String = resp
        .content
        .into_iter()
        .filter_map(|b| match b {
            ResponseBlock::Text { text } => Some(text),
            ResponseBlock::Other => None,
        })
        .collect::<Vec<_>>()
        .join("\n");
    if text.is_empty() {
        Err(InferenceError::EmptyResponse)
    } else {
        Ok(text)
    }
}

fn media_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn client() -> AnthropicClient {
        AnthropicClient::new(
            "https://api.example.com/".into(),
            "test-key".into(),
            DEFAULT_MODEL.into(),
        )
    }

    #[test]
    fn trims_trailing_slash() {
        assert_eq!(client().base_url, "https://api.example.com");
    }

    #[tokio::test]
    async fn url_image_request_shape() {
        let body = client()
            .with_max_tokens(512)
            .build_request(InferenceRequest {
                system_prompt: Some("be brief".into()),
                instruction: "Analyze the product image".into(),
                image: ImageRef::Url("https://example.com/can.png".into()),
            })
            .await
            .unwrap();

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["max_tokens"], 512);
        assert_eq!(json["system"], "be brief");
        let content = &json["messages"][0]["content"];
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(content[0]["type"], "image");
        assert_eq!(content[0]["source"]["type"], "url");
        assert_eq!(content[0]["source"]["url"], "https://example.com/can.png");
        assert_eq!(content[1]["type"], "text");
        assert_eq!(content[1]["text"], "Analyze the product image");
    }

    #[tokio::test]
    async fn path_image_is_inlined_as_base64() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("label.jpg");
        std::fs::write(&path, b"jpeg-bytes").unwrap();

        let body = client()
            .build_request(InferenceRequest {
                system_prompt: None,
                instruction: "go".into(),
                image: ImageRef::Path(path),
            })
            .await
            .unwrap();

        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("system").is_none());
        let source = &json["messages"][0]["content"][0]["source"];
        assert_eq!(source["type"], "base64");
        assert_eq!(source["media_type"], "image/jpeg");
        assert_eq!(source["data"], general_purpose::STANDARD.encode(b"jpeg-bytes"));
    }

    #[tokio::test]
    async fn missing_image_file_is_io_error() {
        let err = client()
            .build_request(InferenceRequest {
                system_prompt: None,
                instruction: "go".into(),
                image: ImageRef::Path(PathBuf::from("/no/such/file.jpg")),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, InferenceError::Io(_)));
    }

    #[test]
    fn response_text_blocks_are_joined() {
        let resp: MessagesResponse = serde_json::from_str(
            r#"{"content": [
                {"type": "text", "text": "📸 Detected: Soda"},
                {"type": "tool_use", "id": "x", "name": "search", "input": {}},
                {"type": "text", "text": "✅ Low Risk: Water"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(join_text(resp).unwrap(), "📸 Detected: Soda\n✅ Low Risk: Water");
    }

    #[test]
    fn response_without_text_is_empty_error() {
        let resp: MessagesResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(matches!(join_text(resp), Err(InferenceError::EmptyResponse)));
    }

    #[test]
    fn media_type_from_extension() {
        assert_eq!(media_type(Path::new("a.PNG")), "image/png");
        assert_eq!(media_type(Path::new("a.webp")), "image/webp");
        assert_eq!(media_type(Path::new("a")), "image/jpeg");
    }
}
