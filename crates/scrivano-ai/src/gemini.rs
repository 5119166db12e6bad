//! Gemini analysis backend.
//!
//! Calls the Generative Language API's `generateContent` endpoint with
//! `responseMimeType: application/json` and coerces the model's free-form
//! JSON into the fixed [`AiAnalysis`] shape. Missing fields fall back to
//! generic defaults; confidence is clamped to [0, 1]; the kind tag is always
//! the requested kind, never whatever the model claims.

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

use scrivano_core::{defaults, AiAnalysis, AnalysisKind, Error, Result};

use crate::backend::AnalysisBackend;

/// Live backend for the Generative Language API.
pub struct GeminiBackend {
    base_url: String,
    api_key: String,
    model: String,
    /// Natural language results are requested in.
    language: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl GeminiBackend {
    pub fn new(base_url: String, api_key: String, model: String, language: String) -> Self {
        Self {
            base_url,
            api_key,
            model,
            language,
            client: reqwest::Client::new(),
            timeout_secs: 120,
        }
    }

    /// Create from environment variables.
    /// Returns None if GEMINI_API_KEY is not set — the caller should fall
    /// back to the guest backend.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var(defaults::ENV_GEMINI_API_KEY).ok()?;
        if api_key.is_empty() {
            return None;
        }
        let base_url = std::env::var(defaults::ENV_GEMINI_BASE_URL)
            .unwrap_or_else(|_| defaults::GEMINI_BASE_URL.to_string());
        let model = std::env::var(defaults::ENV_GEMINI_MODEL)
            .unwrap_or_else(|_| defaults::GEMINI_MODEL.to_string());
        let language = std::env::var(defaults::ENV_ANALYSIS_LANGUAGE)
            .unwrap_or_else(|_| defaults::ANALYSIS_LANGUAGE.to_string());
        Some(Self::new(base_url, api_key, model, language))
    }

    fn json_shape_instruction(&self) -> String {
        format!(
            "Respond in {} as JSON with this exact shape: \
             {{\"summary\": \"short summary\", \"keyPoints\": [\"point1\", \"point2\"], \
             \"confidence\": 0.95}}",
            self.language
        )
    }

    /// Send one generateContent request and normalize the reply.
    async fn generate(
        &self,
        prompt: String,
        inline_image: Option<(&str, &[u8])>,
        kind: AnalysisKind,
    ) -> Result<AiAnalysis> {
        let mut parts = vec![RequestPart {
            text: Some(prompt),
            inline_data: None,
        }];
        if let Some((mime_type, data)) = inline_image {
            parts.push(RequestPart {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: mime_type.to_string(),
                    data: base64::engine::general_purpose::STANDARD.encode(data),
                }),
            });
        }

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts,
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let response = self
            .client
            .post(&url)
            .json(&request)
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .send()
            .await
            .map_err(|e| Error::Analysis(format!("Gemini request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Analysis(format!(
                "Gemini API returned {status}: {body}"
            )));
        }

        let reply: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Analysis(format!("Failed to parse Gemini response: {e}")))?;

        let text = reply
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| Error::Analysis("Gemini response had no candidates".to_string()))?;

        let raw: RawAnalysis = serde_json::from_str(text)
            .map_err(|e| Error::Analysis(format!("Gemini returned malformed JSON: {e}")))?;

        debug!(model = %self.model, kind = %kind, "Gemini analysis completed");
        Ok(normalize(raw, kind))
    }
}

/// Coerce the model's free-form JSON into the fixed result shape.
fn normalize(raw: RawAnalysis, kind: AnalysisKind) -> AiAnalysis {
    let summary = match raw.summary {
        Some(s) if !s.trim().is_empty() => s,
        _ => default_summary(kind).to_string(),
    };
    AiAnalysis {
        summary,
        key_points: raw.key_points.unwrap_or_default(),
        confidence: raw.confidence.unwrap_or(0.8).clamp(0.0, 1.0),
        kind,
    }
}

fn default_summary(kind: AnalysisKind) -> &'static str {
    match kind {
        AnalysisKind::Image => "Image analyzed",
        AnalysisKind::Pdf => "Document analyzed",
        AnalysisKind::Audio => "Audio analyzed",
        AnalysisKind::Youtube => "YouTube video analyzed",
        AnalysisKind::NoteSummary => "Note summarized",
        AnalysisKind::Error => "Analysis failed",
    }
}

#[async_trait]
impl AnalysisBackend for GeminiBackend {
    async fn analyze_image(&self, image: &[u8], mime_type: &str) -> Result<AiAnalysis> {
        let prompt = format!(
            "Analyze this image and provide a detailed summary with key points, \
             including any text visible in the image. {}",
            self.json_shape_instruction()
        );
        self.generate(prompt, Some((mime_type, image)), AnalysisKind::Image)
            .await
    }

    async fn analyze_pdf_text(&self, text: &str) -> Result<AiAnalysis> {
        let prompt = format!(
            "You are an expert document analyst. Analyze this text extracted from a \
             PDF and produce a detailed summary with key points: \"{text}\" {}",
            self.json_shape_instruction()
        );
        self.generate(prompt, None, AnalysisKind::Pdf).await
    }

    async fn analyze_transcript(&self, transcript: &str) -> Result<AiAnalysis> {
        let prompt = format!(
            "Analyze this audio transcript and produce a summary with key points: \
             \"{transcript}\" {}",
            self.json_shape_instruction()
        );
        self.generate(prompt, None, AnalysisKind::Audio).await
    }

    async fn analyze_youtube(
        &self,
        video_id: &str,
        metadata: Option<&crate::capability::VideoMetadata>,
    ) -> Result<AiAnalysis> {
        let prompt = match metadata {
            Some(meta) => format!(
                "Analyze this YouTube video from its metadata. Title: \"{}\". \
                 Description: \"{}\". {}",
                meta.title,
                meta.description,
                self.json_shape_instruction()
            ),
            // No metadata capability: the model sees only the opaque id, so
            // this is a guess, not a description of the actual video.
            None => format!(
                "Provide a speculative analysis of a YouTube video given only its \
                 video id ({video_id}). Make clear the analysis is not based on the \
                 actual video content. {}",
                self.json_shape_instruction()
            ),
        };
        self.generate(prompt, None, AnalysisKind::Youtube).await
    }

    async fn summarize_note(&self, content: &str) -> Result<AiAnalysis> {
        let prompt = format!(
            "Summarize the content of this note, keeping the most important \
             information: \"{content}\" {}",
            self.json_shape_instruction()
        );
        self.generate(prompt, None, AnalysisKind::NoteSummary).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent {
    role: String,
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// The model's free-form result shape before normalization.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawAnalysis {
    summary: Option<String>,
    key_points: Option<Vec<String>>,
    confidence: Option<f32>,
}
