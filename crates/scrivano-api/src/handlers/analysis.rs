//! AI analysis handlers.
//!
//! Upload routes accept multipart/form-data with a single file field, check
//! the declared MIME type against a per-route allow-list, spool the bytes to
//! a temp file, and hand the path to the analysis service. Provider failures
//! surface as a 200 with an error-shaped body (`type: "error"`, confidence
//! 0), so clients always receive a well-formed analysis result; only
//! boundary validation (missing file, bad MIME, unparseable YouTube URL)
//! produces a 4xx.

use std::path::PathBuf;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use scrivano_core::defaults::{ALLOWED_AUDIO_MIMES, ALLOWED_IMAGE_MIMES, ALLOWED_PDF_MIMES};
use scrivano_core::AiAnalysis;

use crate::auth::Principal;
use crate::error::ApiError;
use crate::AppState;

/// Request body for YouTube analysis.
#[derive(Debug, Deserialize)]
pub struct AnalyzeYoutubeRequest {
    pub url: String,
}

/// Request body for note summarization.
#[derive(Debug, Deserialize)]
pub struct SummarizeNoteRequest {
    pub content: String,
}

/// One uploaded file pulled out of a multipart body.
struct Upload {
    data: Vec<u8>,
    content_type: String,
}

/// Read the expected file field from a multipart body.
///
/// Unknown fields are skipped so clients can send extra form values without
/// breaking. Returns 400 if the field is absent or unreadable.
async fn read_upload(
    mut multipart: Multipart,
    field_name: &str,
    allowed_mimes: &[&str],
) -> Result<Upload, ApiError> {
    let mut upload: Option<Upload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() != Some(field_name) {
            continue;
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))?
            .to_vec();
        upload = Some(Upload { data, content_type });
    }

    let upload = upload.ok_or_else(|| {
        ApiError::BadRequest(format!("No {} file provided", field_name))
    })?;

    if !allowed_mimes.contains(&upload.content_type.as_str()) {
        return Err(ApiError::BadRequest("File type not supported".to_string()));
    }

    Ok(upload)
}

/// Spool upload bytes to a uniquely named temp file.
async fn spool_to_temp(data: &[u8]) -> Result<PathBuf, ApiError> {
    let path = std::env::temp_dir().join(format!("scrivano-upload-{}", Uuid::new_v4()));
    tokio::fs::write(&path, data)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to store upload: {}", e)))?;
    Ok(path)
}

/// Remove a temp file, logging rather than failing when cleanup misses.
async fn cleanup_temp(path: &PathBuf) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!(path = %path.display(), error = %e, "Failed to remove upload temp file");
    }
}

/// Analyze an uploaded image. Multipart field: `image`.
pub async fn analyze_image(
    State(state): State<AppState>,
    principal: Principal,
    multipart: Multipart,
) -> Result<Json<AiAnalysis>, ApiError> {
    let upload = read_upload(multipart, "image", ALLOWED_IMAGE_MIMES).await?;
    info!(
        op = "analyze_image",
        user_id = %principal.user_id,
        upload_bytes = upload.data.len(),
        mime = %upload.content_type,
        "Image analysis requested"
    );

    let path = spool_to_temp(&upload.data).await?;
    let analysis = state
        .analysis
        .analyze_image_file(&path, &upload.content_type)
        .await;
    cleanup_temp(&path).await;

    Ok(Json(analysis))
}

/// Analyze an uploaded PDF. Multipart field: `pdf`.
pub async fn analyze_pdf(
    State(state): State<AppState>,
    principal: Principal,
    multipart: Multipart,
) -> Result<Json<AiAnalysis>, ApiError> {
    let upload = read_upload(multipart, "pdf", ALLOWED_PDF_MIMES).await?;
    info!(
        op = "analyze_pdf",
        user_id = %principal.user_id,
        upload_bytes = upload.data.len(),
        "PDF analysis requested"
    );

    let path = spool_to_temp(&upload.data).await?;
    let analysis = state.analysis.analyze_pdf_file(&path).await;
    cleanup_temp(&path).await;

    Ok(Json(analysis))
}

/// Analyze an uploaded audio recording. Multipart field: `audio`.
pub async fn analyze_audio(
    State(state): State<AppState>,
    principal: Principal,
    multipart: Multipart,
) -> Result<Json<AiAnalysis>, ApiError> {
    let upload = read_upload(multipart, "audio", ALLOWED_AUDIO_MIMES).await?;
    info!(
        op = "analyze_audio",
        user_id = %principal.user_id,
        upload_bytes = upload.data.len(),
        mime = %upload.content_type,
        "Audio analysis requested"
    );

    let path = spool_to_temp(&upload.data).await?;
    let analysis = state
        .analysis
        .analyze_audio_file(&path, &upload.content_type)
        .await;
    cleanup_temp(&path).await;

    Ok(Json(analysis))
}

/// Analyze a YouTube video by URL.
///
/// A URL with no extractable video id is a validation failure (400), not an
/// error-shaped 200: the request never reaches the provider.
pub async fn analyze_youtube(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<AnalyzeYoutubeRequest>, JsonRejection>,
) -> Result<Json<AiAnalysis>, ApiError> {
    let Json(req) = payload?;
    if req.url.trim().is_empty() {
        return Err(ApiError::BadRequest("YouTube URL is required".to_string()));
    }
    info!(op = "analyze_youtube", user_id = %principal.user_id, "YouTube analysis requested");

    let analysis = state.analysis.analyze_youtube(&req.url).await?;
    Ok(Json(analysis))
}

/// Summarize note content.
pub async fn summarize_note(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<SummarizeNoteRequest>, JsonRejection>,
) -> Result<Json<AiAnalysis>, ApiError> {
    let Json(req) = payload?;
    if req.content.trim().is_empty() {
        return Err(ApiError::BadRequest("Note content is required".to_string()));
    }
    info!(op = "summarize_note", user_id = %principal.user_id, "Note summary requested");

    let analysis = state.analysis.summarize_note(&req.content).await;
    Ok(Json(analysis))
}
