//! Pluggable external capabilities: PDF text extraction, audio
//! transcription, and YouTube metadata retrieval.
//!
//! Each capability ships a stub that is explicitly and visibly a stub
//! (`is_stub() == true`), so callers and tests can distinguish "capability
//! absent" from "capability failed". The transcription capability also has a
//! live OpenAI-compatible Whisper implementation.

use async_trait::async_trait;
use serde::Deserialize;

use scrivano_core::{defaults, Error, Result};

// ---------------------------------------------------------------------------
// Text extraction (PDF → text)
// ---------------------------------------------------------------------------

/// Extracts analyzable text from PDF bytes.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, pdf: &[u8]) -> Result<String>;

    /// True when the implementation returns placeholder output.
    fn is_stub(&self) -> bool {
        false
    }
}

/// Placeholder returned by [`StubTextExtractor`]. Analyzed in place of real
/// document content until a real extractor is plugged in.
pub const STUB_PDF_TEXT: &str =
    "PDF text extraction is not configured; this placeholder was analyzed instead of the document";

/// Stub extractor: returns a fixed placeholder for any input.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubTextExtractor;

#[async_trait]
impl TextExtractor for StubTextExtractor {
    async fn extract(&self, _pdf: &[u8]) -> Result<String> {
        Ok(STUB_PDF_TEXT.to_string())
    }

    fn is_stub(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// Transcription (audio → transcript)
// ---------------------------------------------------------------------------

/// Result of audio transcription.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub text: String,
    /// Detected language (ISO 639-1 code), when the backend reports one.
    pub language: Option<String>,
}

/// Obtains a transcript from audio bytes.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &[u8], mime_type: &str) -> Result<Transcript>;

    /// True when the implementation returns placeholder output.
    fn is_stub(&self) -> bool {
        false
    }

    /// Model or implementation name.
    fn name(&self) -> &str;
}

/// Placeholder transcript returned by [`StubTranscriber`].
pub const STUB_TRANSCRIPT: &str =
    "Audio transcription is not configured; the audio content was not transcribed";

/// Stub transcriber used when no Whisper server is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubTranscriber;

#[async_trait]
impl Transcriber for StubTranscriber {
    async fn transcribe(&self, _audio: &[u8], _mime_type: &str) -> Result<Transcript> {
        Ok(Transcript {
            text: STUB_TRANSCRIPT.to_string(),
            language: None,
        })
    }

    fn is_stub(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// OpenAI-compatible Whisper transcriber (works with faster-whisper-server
/// style deployments).
pub struct WhisperTranscriber {
    base_url: String,
    model: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl WhisperTranscriber {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            base_url,
            model,
            client: reqwest::Client::new(),
            timeout_secs: 300, // 5 min for long audio
        }
    }

    /// Create from environment variables.
    /// Returns None if WHISPER_BASE_URL is not set.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var(defaults::ENV_WHISPER_BASE_URL).ok()?;
        if base_url.is_empty() {
            return None;
        }
        let model = std::env::var(defaults::ENV_WHISPER_MODEL)
            .unwrap_or_else(|_| defaults::DEFAULT_WHISPER_MODEL.to_string());
        Some(Self::new(base_url, model))
    }
}

/// OpenAI Whisper API response format.
#[derive(Deserialize)]
struct WhisperResponse {
    text: String,
    #[serde(default)]
    language: Option<String>,
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio: &[u8], mime_type: &str) -> Result<Transcript> {
        let url = format!("{}/v1/audio/transcriptions", self.base_url);

        let ext = match mime_type {
            "audio/mpeg" | "audio/mp3" => "mp3",
            "audio/ogg" => "ogg",
            _ => "wav",
        };

        let file_part = reqwest::multipart::Part::bytes(audio.to_vec())
            .file_name(format!("audio.{ext}"))
            .mime_str(mime_type)
            .map_err(|e| Error::Analysis(format!("Failed to create multipart: {e}")))?;

        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("model", self.model.clone())
            .text("response_format", "json");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .send()
            .await
            .map_err(|e| Error::Analysis(format!("Transcription request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Analysis(format!(
                "Whisper API returned {status}: {body}"
            )));
        }

        let result: WhisperResponse = response
            .json()
            .await
            .map_err(|e| Error::Analysis(format!("Failed to parse whisper response: {e}")))?;

        Ok(Transcript {
            text: result.text,
            language: result.language,
        })
    }

    fn name(&self) -> &str {
        &self.model
    }
}

// ---------------------------------------------------------------------------
// Video metadata
// ---------------------------------------------------------------------------

/// Metadata for a video, when a fetcher is available.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
}

/// Retrieves metadata for a YouTube video id.
#[async_trait]
pub trait VideoMetadataFetcher: Send + Sync {
    /// Returns Ok(None) when the capability cannot supply metadata.
    async fn fetch(&self, video_id: &str) -> Result<Option<VideoMetadata>>;

    fn is_stub(&self) -> bool {
        false
    }
}

/// Stub fetcher: metadata retrieval is not implemented. Analysis falls back
/// to a model guess conditioned only on the video id.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubVideoMetadata;

#[async_trait]
impl VideoMetadataFetcher for StubVideoMetadata {
    async fn fetch(&self, _video_id: &str) -> Result<Option<VideoMetadata>> {
        Ok(None)
    }

    fn is_stub(&self) -> bool {
        true
    }
}
