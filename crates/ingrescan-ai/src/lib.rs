//! Image preparation and inference layer: normalization, the inference
//! port, an Anthropic adapter, and the analysis pipeline.

pub mod acquire;
mod error;
pub mod inference;
pub mod normalize;
pub mod pipeline;

#[cfg(feature = "http")]
pub mod anthropic;

pub use error::{AcquireError, InferenceError, PipelineError};
pub use inference::{InferenceClient, InferenceRequest};
pub use normalize::{MAX_EDGE, NormalizedImage, normalize_image};
pub use pipeline::Analyzer;

#[cfg(feature = "http")]
pub use anthropic::AnthropicClient;
