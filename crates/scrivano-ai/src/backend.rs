//! Analysis backend trait: one operation per content kind.
//!
//! Implementations produce a normalized [`AiAnalysis`] or an error; the
//! [`crate::AnalysisService`] is the only caller and converts every error
//! into the in-band error-shaped result. Backends never need to catch their
//! own failures.

use async_trait::async_trait;
use scrivano_core::{AiAnalysis, Result};

use crate::capability::VideoMetadata;

/// Backend producing structured analysis results from content.
///
/// `GeminiBackend` is the live implementation; `GuestBackend` is the
/// credential-less degraded mode returning deterministic canned results.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Analyze raw image bytes (sent as a multimodal part).
    async fn analyze_image(&self, image: &[u8], mime_type: &str) -> Result<AiAnalysis>;

    /// Summarize text extracted from a PDF.
    async fn analyze_pdf_text(&self, text: &str) -> Result<AiAnalysis>;

    /// Summarize an audio transcript.
    async fn analyze_transcript(&self, transcript: &str) -> Result<AiAnalysis>;

    /// Produce an analysis for a YouTube video. Without metadata this is a
    /// model guess conditioned only on the opaque id, and results are
    /// non-authoritative.
    async fn analyze_youtube(
        &self,
        video_id: &str,
        metadata: Option<&VideoMetadata>,
    ) -> Result<AiAnalysis>;

    /// Summarize a note's content. The content is raw HTML; no markup
    /// stripping is performed before sending.
    async fn summarize_note(&self, content: &str) -> Result<AiAnalysis>;

    /// Whether this backend calls a real provider.
    fn is_live(&self) -> bool {
        true
    }

    /// Model identifier used for analysis.
    fn model_name(&self) -> &str;
}
