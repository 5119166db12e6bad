//! scrivano-api - HTTP API server for scrivano.
//!
//! Router construction and shared application state. The binary in
//! `main.rs` handles environment loading, logging, and serving; tests
//! build the same router with in-memory state and drive it through
//! `tower::ServiceExt`.

pub mod auth;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use governor::{Quota, RateLimiter};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use scrivano_ai::AnalysisService;
use scrivano_core::defaults::MAX_UPLOAD_BYTES;
use scrivano_core::{FolderRepository, NoteRepository};

pub use auth::Principal;
pub use error::ApiError;

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically and line
/// up with log timestamps when correlating requests.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Global rate limiter shared by every request.
pub type GlobalRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn NoteRepository>,
    pub folders: Arc<dyn FolderRepository>,
    pub analysis: Arc<AnalysisService>,
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

impl AppState {
    /// Build a rate limiter allowing `requests` per `period_secs` seconds.
    pub fn rate_limiter_from_config(
        requests: u32,
        period_secs: u64,
    ) -> Option<Arc<GlobalRateLimiter>> {
        let quota = Quota::with_period(std::time::Duration::from_secs(period_secs))?
            .allow_burst(std::num::NonZeroU32::new(requests)?);
        Some(Arc::new(RateLimiter::direct(quota)))
    }
}

/// Parse the CORS origin whitelist from `ALLOWED_ORIGINS`.
///
/// Comma-separated list; invalid entries are logged and skipped. Defaults
/// to local development origins when unset.
pub fn parse_allowed_origins() -> Vec<HeaderValue> {
    let origins_str = std::env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string());

    if origins_str.trim().is_empty() {
        return vec![
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://localhost:5173"),
        ];
    }

    origins_str
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            tracing::warn!("Rate limit exceeded");
            return Err((
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "error": "rate_limit_exceeded",
                })),
            ));
        }
    }
    Ok(next.run(request).await)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Notes
        .route(
            "/api/notes",
            get(handlers::notes::list_notes).post(handlers::notes::create_note),
        )
        .route(
            "/api/notes/:id",
            get(handlers::notes::get_note)
                .put(handlers::notes::update_note)
                .delete(handlers::notes::delete_note),
        )
        // Folders
        .route(
            "/api/folders",
            get(handlers::folders::list_folders).post(handlers::folders::create_folder),
        )
        .route("/api/folders/:id", delete(handlers::folders::delete_folder))
        // AI analysis
        .route("/api/ai/analyze-image", post(handlers::analysis::analyze_image))
        .route("/api/ai/analyze-pdf", post(handlers::analysis::analyze_pdf))
        .route("/api/ai/analyze-audio", post(handlers::analysis::analyze_audio))
        .route(
            "/api/ai/analyze-youtube",
            post(handlers::analysis::analyze_youtube),
        )
        .route(
            "/api/ai/summarize-note",
            post(handlers::analysis::summarize_note),
        )
        // Middleware
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer({
            let allowed_origins = parse_allowed_origins();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed_origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    header::AUTHORIZATION,
                    header::CONTENT_TYPE,
                    header::ACCEPT,
                    axum::http::HeaderName::from_static(auth::USER_ID_HEADER),
                ])
                .allow_credentials(true)
                .max_age(std::time::Duration::from_secs(3600))
        })
        // Uploads are capped at 50MB, matching the multipart read limit
        .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
