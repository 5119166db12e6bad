//! Guest analysis backend: the degraded mode used when no provider
//! credential is configured.
//!
//! Every operation returns a deterministic, kind-tagged result whose summary
//! tells the operator to configure `GEMINI_API_KEY`. This is a first-class
//! contract rather than an error: uploads still succeed and the client still
//! renders a result card.

use async_trait::async_trait;
use scrivano_core::{AiAnalysis, AnalysisKind, Result};

use crate::backend::AnalysisBackend;

const CONFIGURE_HINT: &str = "configure GEMINI_API_KEY for AI analysis";
const GUEST_POINT: &str = "AI analysis not available in guest mode";

/// Credential-less backend returning canned, deterministic results.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuestBackend;

impl GuestBackend {
    pub fn new() -> Self {
        Self
    }

    fn canned(kind: AnalysisKind, summary: String, first_point: &str) -> AiAnalysis {
        let confidence = match kind {
            AnalysisKind::NoteSummary => 0.9,
            AnalysisKind::Image | AnalysisKind::Pdf => 0.8,
            _ => 0.7,
        };
        AiAnalysis {
            summary,
            key_points: vec![first_point.to_string(), GUEST_POINT.to_string()],
            confidence,
            kind,
        }
    }
}

#[async_trait]
impl AnalysisBackend for GuestBackend {
    async fn analyze_image(&self, _image: &[u8], _mime_type: &str) -> Result<AiAnalysis> {
        Ok(Self::canned(
            AnalysisKind::Image,
            format!("Image uploaded successfully - {CONFIGURE_HINT}"),
            "Image file identified",
        ))
    }

    async fn analyze_pdf_text(&self, _text: &str) -> Result<AiAnalysis> {
        Ok(Self::canned(
            AnalysisKind::Pdf,
            format!("PDF uploaded successfully - {CONFIGURE_HINT}"),
            "PDF file identified",
        ))
    }

    async fn analyze_transcript(&self, _transcript: &str) -> Result<AiAnalysis> {
        Ok(Self::canned(
            AnalysisKind::Audio,
            format!("Audio uploaded successfully - {CONFIGURE_HINT}"),
            "Audio file identified",
        ))
    }

    async fn analyze_youtube(
        &self,
        video_id: &str,
        _metadata: Option<&crate::capability::VideoMetadata>,
    ) -> Result<AiAnalysis> {
        Ok(Self::canned(
            AnalysisKind::Youtube,
            format!("YouTube video identified: {video_id} - {CONFIGURE_HINT}"),
            "Valid YouTube URL",
        ))
    }

    async fn summarize_note(&self, _content: &str) -> Result<AiAnalysis> {
        Ok(Self::canned(
            AnalysisKind::NoteSummary,
            format!("Note identified - {CONFIGURE_HINT}"),
            "Note content available",
        ))
    }

    fn is_live(&self) -> bool {
        false
    }

    fn model_name(&self) -> &str {
        "guest"
    }
}
