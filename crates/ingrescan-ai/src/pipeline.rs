//! Normalize → submit → extract.
//!
//! Acquisition failures are surfaced as errors. Inference failures are
//! not: they become an `Error: ...` placeholder that runs through the same
//! extraction as any other text, so the caller still gets a (mostly empty)
//! report with the message kept in `raw_text`.

use std::path::Path;

use image::DynamicImage;
use ingrescan_core::prompt::{SYSTEM_PROMPT, analysis_instructions};
use ingrescan_core::{AnalysisReport, AnalysisSession, ImageRef};
use tracing::{info, warn};

use crate::acquire::load_image;
use crate::error::{AcquireError, PipelineError};
use crate::inference::{InferenceClient, InferenceRequest};
use crate::normalize::NormalizedImage;

/// Runs analyses against one inference client.
pub struct Analyzer<C> {
    client: C,
    system_prompt: Option<String>,
    instruction: String,
    #[cfg(feature = "http")]
    http: reqwest::Client,
}

impl<C: InferenceClient> Analyzer<C> {
    /// Use the built-in system prompt and product analysis instruction.
    pub fn new(client: C) -> Self {
        Self {
            client,
            system_prompt: Some(SYSTEM_PROMPT.to_string()),
            instruction: analysis_instructions(),
            #[cfg(feature = "http")]
            http: reqwest::Client::new(),
        }
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: Option<String>) -> Self {
        self.system_prompt = system_prompt;
        self
    }

    /// Normalize `image`, submit it, and extract the report.
    ///
    /// The staged temp file is removed before this returns, whatever the
    /// inference outcome.
    pub async fn analyze_image(&self, image: DynamicImage) -> Result<AnalysisReport, AcquireError> {
        let staged = NormalizedImage::prepare(image)?;
        let (width, height) = staged.dimensions();
        info!(width, height, "submitting normalized image");

        let raw = self.submit(ImageRef::Path(staged.path().to_path_buf())).await;

        if let Err(e) = staged.close() {
            warn!(error = %e, "failed to remove staged image");
        }
        Ok(AnalysisReport::from_raw(raw))
    }

    /// Load an image file and analyze it.
    pub async fn analyze_path(&self, path: &Path) -> Result<AnalysisReport, AcquireError> {
        let image = load_image(path)?;
        self.analyze_image(image).await
    }

    /// Fetch an image over HTTP and analyze it.
    #[cfg(feature = "http")]
    pub async fn analyze_url(&self, url: &str) -> Result<AnalysisReport, AcquireError> {
        let image = crate::acquire::fetch_image(&self.http, url).await?;
        self.analyze_image(image).await
    }

    /// Analyze `source` while tracking progress in `session`.
    ///
    /// On acquisition failure the session moves to `Failed` and the error
    /// is returned. A session that already has an analysis in flight is
    /// left untouched.
    pub async fn run(
        &self,
        session: &mut AnalysisSession,
        source: ImageRef,
    ) -> Result<AnalysisReport, PipelineError> {
        session.submit(source.clone())?;

        let outcome = match &source {
            ImageRef::Path(path) => self.analyze_path(path).await,
            ImageRef::Url(url) => self.acquire_url(url).await,
        };

        match outcome {
            Ok(report) => {
                session.complete(report.clone())?;
                Ok(report)
            }
            Err(e) => {
                session.fail(e.to_string())?;
                Err(e.into())
            }
        }
    }

    #[cfg(feature = "http")]
    async fn acquire_url(&self, url: &str) -> Result<AnalysisReport, AcquireError> {
        self.analyze_url(url).await
    }

    #[cfg(not(feature = "http"))]
    async fn acquire_url(&self, url: &str) -> Result<AnalysisReport, AcquireError> {
        Err(AcquireError::Unsupported(url.to_string()))
    }

    async fn submit(&self, image: ImageRef) -> String {
        let request = InferenceRequest {
            system_prompt: self.system_prompt.clone(),
            instruction: self.instruction.clone(),
            image,
        };
        match self.client.generate(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "inference failed, continuing with error text");
                format!("Error: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InferenceError;
    use std::path::PathBuf;
    use std::sync::Mutex;

    const REPLY: &str = "\
📸 Detected: Peanut Butter
⭐️⭐️⭐️⭐️ Overall Rating
🔍 Breakdown:
- Protein: 4
- Sugar: 3
🚨 High-Risk: Palm Oil
⚠️ Moderate Risk: Salt
✅ Low Risk: Peanuts";

    /// Records what it was sent and whether the staged file existed then.
    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(PathBuf, bool, (u32, u32))>>,
        fail: bool,
    }

    impl InferenceClient for Recorder {
        async fn generate(&self, request: InferenceRequest) -> Result<String, InferenceError> {
            let ImageRef::Path(path) = request.image else {
                panic!("pipeline must submit a staged file");
            };
            let dims = image::image_dimensions(&path).unwrap_or((0, 0));
            self.seen.lock().unwrap().push((path.clone(), path.exists(), dims));
            assert!(request.instruction.contains("🔍 Breakdown:"));
            if self.fail {
                Err(InferenceError::Server {
                    status: 529,
                    body: "overloaded".into(),
                })
            } else {
                Ok(REPLY.to_string())
            }
        }
    }

    fn failing() -> Recorder {
        Recorder {
            fail: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn extracts_report_and_removes_temp_file() {
        let client = Recorder::default();
        let analyzer = Analyzer::new(&client);
        let report = analyzer
            .analyze_image(DynamicImage::new_rgba8(1600, 800))
            .await
            .unwrap();

        assert_eq!(report.product_label.as_deref(), Some("Peanut Butter"));
        assert_eq!(report.rating_glyph_count, 3);
        assert_eq!(report.parameter_scores.len(), 2);
        assert_eq!(report.risks.high_risk, vec!["Palm Oil"]);

        let seen = client.seen.lock().unwrap();
        let (path, existed, dims) = &seen[0];
        assert!(*existed);
        assert_eq!(*dims, (800, 400));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn inference_failure_becomes_placeholder_report() {
        let client = failing();
        let report = Analyzer::new(&client)
            .analyze_image(DynamicImage::new_rgb8(40, 30))
            .await
            .unwrap();

        assert!(report.is_blank());
        assert_eq!(report.raw_text, "Error: server returned 529: overloaded");

        let seen = client.seen.lock().unwrap();
        assert!(!seen[0].0.exists());
    }

    #[tokio::test]
    async fn missing_file_is_acquisition_error() {
        let client = Recorder::default();
        let err = Analyzer::new(&client)
            .analyze_path(Path::new("/no/such/photo.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, AcquireError::NotFound(_)));
        assert!(client.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn run_completes_session() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("jar.png");
        DynamicImage::new_rgb8(100, 100).save(&path).unwrap();

        let client = Recorder::default();
        let analyzer = Analyzer::new(&client);
        let mut session = AnalysisSession::new();
        let report = analyzer
            .run(&mut session, ImageRef::Path(path))
            .await
            .unwrap();
        assert_eq!(report.product_label.as_deref(), Some("Peanut Butter"));
        assert_eq!(session.state().as_str(), "completed");
    }

    #[tokio::test]
    async fn run_records_acquisition_failure() {
        let client = Recorder::default();
        let analyzer = Analyzer::new(&client);
        let mut session = AnalysisSession::new();
        let err = analyzer
            .run(&mut session, ImageRef::Path(PathBuf::from("/no/such/photo.png")))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Acquire(AcquireError::NotFound(_))));
        assert_eq!(session.state().as_str(), "failed");
        assert!(session.report().is_none());
    }

    #[tokio::test]
    async fn run_refuses_concurrent_analysis() {
        let client = Recorder::default();
        let analyzer = Analyzer::new(&client);
        let mut session = AnalysisSession::new();
        session
            .submit(ImageRef::Url("https://example.com/a.jpg".into()))
            .unwrap();
        let err = analyzer
            .run(&mut session, ImageRef::Path(PathBuf::from("/tmp/b.jpg")))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Session(_)));
        assert!(session.is_in_flight());
    }

    #[tokio::test]
    async fn custom_instruction_is_sent() {
        struct Echo;
        impl InferenceClient for Echo {
            async fn generate(&self, request: InferenceRequest) -> Result<String, InferenceError> {
                Ok(request.instruction)
            }
        }
        let report = Analyzer::new(Echo)
            .with_instruction("📸 Detected: from instruction")
            .with_system_prompt(None)
            .analyze_image(DynamicImage::new_rgb8(8, 8))
            .await
            .unwrap();
        assert_eq!(report.product_label.as_deref(), Some("from instruction"));
    }
}
