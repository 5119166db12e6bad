//! Request identity extraction.
//!
//! Identity is a trust-on-header model: the `x-user-id` header value is
//! taken verbatim as the caller's owner key. There is no token validation
//! and no session store; any two requests carrying the same header value
//! see the same data. This is a deliberate placeholder until a real
//! authentication layer lands.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::AppState;

/// Header carrying the caller's owner key.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the authenticated principal.
///
/// Usage:
/// ```ignore
/// async fn my_handler(principal: Principal) -> impl IntoResponse {
///     let notes = state.notes.list_for_user(&principal.user_id).await?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Principal {
    /// Owner key every store call is scoped by.
    pub user_id: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Principal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty());

        match user_id {
            Some(id) => Ok(Principal {
                user_id: id.to_string(),
            }),
            None => Err(ApiError::Unauthorized(
                "Authentication required".to_string(),
            )),
        }
    }
}
