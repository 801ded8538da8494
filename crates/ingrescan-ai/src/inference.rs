//! Port to the external inference service.

use std::future::Future;

use ingrescan_core::ImageRef;

use crate::error::InferenceError;

/// One analysis request: a task instruction plus the image to look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    pub system_prompt: Option<String>,
    pub instruction: String,
    pub image: ImageRef,
}

/// A service that turns an image and an instruction into one text blob.
///
/// No schema is imposed on the returned text.
pub trait InferenceClient: Send + Sync {
    fn generate(
        &self,
        request: InferenceRequest,
    ) -> impl Future<Output = Result<String, InferenceError>> + Send;
}

impl<C: InferenceClient> InferenceClient for &C {
    fn generate(
        &self,
        request: InferenceRequest,
    ) -> impl Future<Output = Result<String, InferenceError>> + Send {
        (**self).generate(request)
    }
}
