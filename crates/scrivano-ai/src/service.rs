//! Analysis orchestration.
//!
//! `AnalysisService` is the adapter the HTTP layer talks to: one operation
//! per content input, each returning a well-formed [`AiAnalysis`]. Provider,
//! network, and parse failures never escape — they collapse into the
//! error-shaped result (`type: "error"`, confidence 0, empty key points).
//! The one deliberate exception is a YouTube URL with no extractable video
//! id, which fails with [`Error::InvalidInput`] before any provider call so
//! the boundary can reject it as a validation error.

use std::path::Path;

use tracing::{info, warn};

use scrivano_core::{AiAnalysis, Error, Result};

use crate::backend::AnalysisBackend;
use crate::capability::{
    StubTextExtractor, StubTranscriber, StubVideoMetadata, TextExtractor, Transcriber,
    VideoMetadataFetcher, WhisperTranscriber,
};
use crate::gemini::GeminiBackend;
use crate::guest::GuestBackend;

/// Turns content inputs into structured analysis results.
pub struct AnalysisService {
    backend: Box<dyn AnalysisBackend>,
    extractor: Box<dyn TextExtractor>,
    transcriber: Box<dyn Transcriber>,
    metadata: Box<dyn VideoMetadataFetcher>,
}

impl AnalysisService {
    /// Construct with explicit backend and capabilities.
    pub fn new(
        backend: Box<dyn AnalysisBackend>,
        extractor: Box<dyn TextExtractor>,
        transcriber: Box<dyn Transcriber>,
        metadata: Box<dyn VideoMetadataFetcher>,
    ) -> Self {
        Self {
            backend,
            extractor,
            transcriber,
            metadata,
        }
    }

    /// Construct from environment variables: the Gemini backend when
    /// GEMINI_API_KEY is set, the guest backend otherwise; the Whisper
    /// transcriber when WHISPER_BASE_URL is set, the stub otherwise.
    pub fn from_env() -> Self {
        let backend: Box<dyn AnalysisBackend> = match GeminiBackend::from_env() {
            Some(gemini) => {
                info!(model = gemini.model_name(), "Gemini analysis backend configured");
                Box::new(gemini)
            }
            None => {
                warn!("GEMINI_API_KEY not set - analysis runs in guest mode with canned results");
                Box::new(GuestBackend::new())
            }
        };

        let transcriber: Box<dyn Transcriber> = match WhisperTranscriber::from_env() {
            Some(whisper) => {
                info!(model = whisper.name(), "Whisper transcription configured");
                Box::new(whisper)
            }
            None => Box::new(StubTranscriber),
        };

        Self::new(
            backend,
            Box::new(StubTextExtractor),
            transcriber,
            Box::new(StubVideoMetadata),
        )
    }

    /// Whether a real provider credential is configured.
    pub fn is_live(&self) -> bool {
        self.backend.is_live()
    }

    /// Model identifier of the active backend.
    pub fn model_name(&self) -> &str {
        self.backend.model_name()
    }

    fn recover(kind_hint: &str, err: Error) -> AiAnalysis {
        warn!(error = %err, kind = kind_hint, "Analysis failed, returning error-shaped result");
        AiAnalysis::failure(format!("{kind_hint} analysis failed"))
    }

    /// Analyze image bytes.
    pub async fn analyze_image(&self, image: &[u8], mime_type: &str) -> AiAnalysis {
        match self.backend.analyze_image(image, mime_type).await {
            Ok(analysis) => analysis,
            Err(err) => Self::recover("Image", err),
        }
    }

    /// Analyze PDF bytes: extract text through the pluggable capability,
    /// then summarize the extraction.
    pub async fn analyze_pdf(&self, pdf: &[u8]) -> AiAnalysis {
        if !self.backend.is_live() {
            return match self.backend.analyze_pdf_text("").await {
                Ok(analysis) => analysis,
                Err(err) => Self::recover("PDF", err),
            };
        }

        if self.extractor.is_stub() {
            warn!("PDF text extraction capability absent - analyzing placeholder text");
        }
        let result = async {
            let text = self.extractor.extract(pdf).await?;
            self.backend.analyze_pdf_text(&text).await
        }
        .await;

        match result {
            Ok(analysis) => analysis,
            Err(err) => Self::recover("PDF", err),
        }
    }

    /// Analyze audio bytes: obtain a transcript through the pluggable
    /// capability, then summarize it.
    pub async fn analyze_audio(&self, audio: &[u8], mime_type: &str) -> AiAnalysis {
        if !self.backend.is_live() {
            return match self.backend.analyze_transcript("").await {
                Ok(analysis) => analysis,
                Err(err) => Self::recover("Audio", err),
            };
        }

        if self.transcriber.is_stub() {
            warn!("Audio transcription capability absent - analyzing placeholder transcript");
        }
        let result = async {
            let transcript = self.transcriber.transcribe(audio, mime_type).await?;
            self.backend.analyze_transcript(&transcript.text).await
        }
        .await;

        match result {
            Ok(analysis) => analysis,
            Err(err) => Self::recover("Audio", err),
        }
    }

    /// Analyze a YouTube URL.
    ///
    /// Fails with `InvalidInput` when no video id is extractable; every
    /// other failure is recovered into the error-shaped result. Id
    /// extraction runs regardless of guest mode.
    pub async fn analyze_youtube(&self, url: &str) -> Result<AiAnalysis> {
        let video_id = crate::youtube::extract_video_id(url)
            .ok_or_else(|| Error::InvalidInput(format!("invalid YouTube URL: {url}")))?;

        let metadata = match self.metadata.fetch(video_id).await {
            Ok(meta) => meta,
            Err(err) => {
                warn!(error = %err, "Video metadata fetch failed, continuing without");
                None
            }
        };

        match self.backend.analyze_youtube(video_id, metadata.as_ref()).await {
            Ok(analysis) => Ok(analysis),
            Err(err) => Ok(Self::recover("YouTube", err)),
        }
    }

    /// Summarize a note's content. The HTML markup is sent as-is.
    pub async fn summarize_note(&self, content: &str) -> AiAnalysis {
        match self.backend.summarize_note(content).await {
            Ok(analysis) => analysis,
            Err(err) => Self::recover("Note", err),
        }
    }

    // ─── Path-based variants for spooled uploads ───────────────────────────

    /// Analyze an uploaded image by temp-file path.
    pub async fn analyze_image_file(&self, path: &Path, mime_type: &str) -> AiAnalysis {
        match tokio::fs::read(path).await {
            Ok(bytes) => self.analyze_image(&bytes, mime_type).await,
            Err(err) => Self::recover("Image", err.into()),
        }
    }

    /// Analyze an uploaded PDF by temp-file path.
    pub async fn analyze_pdf_file(&self, path: &Path) -> AiAnalysis {
        match tokio::fs::read(path).await {
            Ok(bytes) => self.analyze_pdf(&bytes).await,
            Err(err) => Self::recover("PDF", err.into()),
        }
    }

    /// Analyze an uploaded audio file by temp-file path.
    pub async fn analyze_audio_file(&self, path: &Path, mime_type: &str) -> AiAnalysis {
        match tokio::fs::read(path).await {
            Ok(bytes) => self.analyze_audio(&bytes, mime_type).await,
            Err(err) => Self::recover("Audio", err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBackend;
    use scrivano_core::AnalysisKind;

    fn guest_service() -> AnalysisService {
        AnalysisService::new(
            Box::new(GuestBackend::new()),
            Box::new(StubTextExtractor),
            Box::new(StubTranscriber),
            Box::new(StubVideoMetadata),
        )
    }

    fn mock_service(backend: MockBackend) -> AnalysisService {
        AnalysisService::new(
            Box::new(backend),
            Box::new(StubTextExtractor),
            Box::new(StubTranscriber),
            Box::new(StubVideoMetadata),
        )
    }

    #[tokio::test]
    async fn guest_mode_returns_kind_tagged_results_and_never_fails() {
        let service = guest_service();
        assert!(!service.is_live());

        assert_eq!(
            service.analyze_image(b"png", "image/png").await.kind,
            AnalysisKind::Image
        );
        assert_eq!(service.analyze_pdf(b"%PDF").await.kind, AnalysisKind::Pdf);
        assert_eq!(
            service.analyze_audio(b"RIFF", "audio/wav").await.kind,
            AnalysisKind::Audio
        );
        assert_eq!(
            service
                .analyze_youtube("https://youtu.be/abc123")
                .await
                .unwrap()
                .kind,
            AnalysisKind::Youtube
        );
        assert_eq!(
            service.summarize_note("<p>hi</p>").await.kind,
            AnalysisKind::NoteSummary
        );
    }

    #[tokio::test]
    async fn invalid_youtube_url_fails_before_any_provider_call() {
        let backend = MockBackend::new();
        let calls = backend.calls_handle();
        let service = mock_service(backend);

        let err = service
            .analyze_youtube("https://vimeo.com/12345")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(calls.lock().unwrap().is_empty(), "provider must not be called");
    }

    #[tokio::test]
    async fn youtube_id_extraction_runs_in_guest_mode_too() {
        let service = guest_service();
        let err = service
            .analyze_youtube("https://example.com/nope")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn backend_failure_collapses_to_error_shape() {
        let service = mock_service(MockBackend::new().failing());

        let result = service.analyze_image(b"png", "image/png").await;
        assert_eq!(result.kind, AnalysisKind::Error);
        assert_eq!(result.confidence, 0.0);
        assert!(result.key_points.is_empty());
        assert!(!result.summary.is_empty());

        // YouTube provider failure is also in-band once the URL is valid.
        let result = service
            .analyze_youtube("https://youtu.be/abc123")
            .await
            .unwrap();
        assert_eq!(result.kind, AnalysisKind::Error);
    }

    #[tokio::test]
    async fn pdf_analysis_feeds_extracted_text_to_backend() {
        let backend = MockBackend::new();
        let calls = backend.calls_handle();
        let service = mock_service(backend);

        let result = service.analyze_pdf(b"%PDF-1.4").await;
        assert_eq!(result.kind, AnalysisKind::Pdf);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].input.contains("PDF text extraction is not configured"));
    }

    #[tokio::test]
    async fn audio_analysis_feeds_transcript_to_backend() {
        let backend = MockBackend::new();
        let calls = backend.calls_handle();
        let service = mock_service(backend);

        let result = service.analyze_audio(b"RIFF", "audio/wav").await;
        assert_eq!(result.kind, AnalysisKind::Audio);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].input.contains("transcription is not configured"));
    }

    #[tokio::test]
    async fn missing_upload_file_recovers_to_error_shape() {
        let service = mock_service(MockBackend::new());
        let result = service
            .analyze_image_file(Path::new("/nonexistent/upload.png"), "image/png")
            .await;
        assert_eq!(result.kind, AnalysisKind::Error);
        assert_eq!(result.confidence, 0.0);
    }
}
