//! Mock analysis backend for deterministic testing.
//!
//! Records every call and returns fixed, kind-tagged results. Failure
//! injection is an explicit switch so tests of the error-shape recovery
//! path stay deterministic.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use scrivano_core::{AiAnalysis, AnalysisKind, Error, Result};

use crate::backend::AnalysisBackend;
use crate::capability::VideoMetadata;

/// A recorded backend call.
#[derive(Debug, Clone)]
pub struct MockCall {
    /// Operation name: "analyze_image", "analyze_pdf_text", ...
    pub operation: String,
    /// The text input, or a byte-length description for binary inputs.
    pub input: String,
}

/// Mock analysis backend.
#[derive(Clone, Default)]
pub struct MockBackend {
    calls: Arc<Mutex<Vec<MockCall>>>,
    fail: bool,
    summary: Option<String>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation return an error.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Use a fixed summary instead of the per-kind default.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Shared handle to the call log for assertions.
    pub fn calls_handle(&self) -> Arc<Mutex<Vec<MockCall>>> {
        self.calls.clone()
    }

    fn respond(&self, operation: &str, input: &str, kind: AnalysisKind) -> Result<AiAnalysis> {
        self.calls.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            input: input.to_string(),
        });
        if self.fail {
            return Err(Error::Analysis("simulated provider failure".to_string()));
        }
        Ok(AiAnalysis {
            summary: self
                .summary
                .clone()
                .unwrap_or_else(|| format!("mock {kind} analysis")),
            key_points: vec!["mock point".to_string()],
            confidence: 0.9,
            kind,
        })
    }
}

#[async_trait]
impl AnalysisBackend for MockBackend {
    async fn analyze_image(&self, image: &[u8], mime_type: &str) -> Result<AiAnalysis> {
        self.respond(
            "analyze_image",
            &format!("{mime_type}:{} bytes", image.len()),
            AnalysisKind::Image,
        )
    }

    async fn analyze_pdf_text(&self, text: &str) -> Result<AiAnalysis> {
        self.respond("analyze_pdf_text", text, AnalysisKind::Pdf)
    }

    async fn analyze_transcript(&self, transcript: &str) -> Result<AiAnalysis> {
        self.respond("analyze_transcript", transcript, AnalysisKind::Audio)
    }

    async fn analyze_youtube(
        &self,
        video_id: &str,
        _metadata: Option<&VideoMetadata>,
    ) -> Result<AiAnalysis> {
        self.respond("analyze_youtube", video_id, AnalysisKind::Youtube)
    }

    async fn summarize_note(&self, content: &str) -> Result<AiAnalysis> {
        self.respond("summarize_note", content, AnalysisKind::NoteSummary)
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_records_calls() {
        let backend = MockBackend::new();
        backend.summarize_note("hello").await.unwrap();
        backend.analyze_youtube("abc", None).await.unwrap();

        let calls = backend.calls_handle();
        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].operation, "summarize_note");
        assert_eq!(calls[0].input, "hello");
        assert_eq!(calls[1].operation, "analyze_youtube");
    }

    #[tokio::test]
    async fn mock_failure_injection() {
        let backend = MockBackend::new().failing();
        let err = backend.summarize_note("hello").await.unwrap_err();
        assert!(matches!(err, Error::Analysis(_)));
    }

    #[tokio::test]
    async fn mock_fixed_summary() {
        let backend = MockBackend::new().with_summary("fixed");
        let result = backend.analyze_pdf_text("text").await.unwrap();
        assert_eq!(result.summary, "fixed");
        assert_eq!(result.kind, AnalysisKind::Pdf);
    }
}
