//! Folder CRUD handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use scrivano_core::{CreateFolder, Folder};

use crate::auth::Principal;
use crate::error::ApiError;
use crate::AppState;

/// List the caller's folders, sorted by name.
pub async fn list_folders(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<Vec<Folder>>, ApiError> {
    let folders = state.folders.list_for_user(&principal.user_id).await?;
    Ok(Json(folders))
}

/// Create a folder. Name must be non-empty after trimming.
pub async fn create_folder(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<CreateFolder>, JsonRejection>,
) -> Result<Json<Folder>, ApiError> {
    let Json(req) = payload?;
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Folder name is required".to_string()));
    }
    let folder = state.folders.create(&principal.user_id, req).await?;
    info!(op = "create_folder", user_id = %principal.user_id, folder_id = %folder.id, "Folder created");
    Ok(Json(folder))
}

/// Delete a folder and every one of the caller's notes inside it.
pub async fn delete_folder(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state.folders.delete(id, &principal.user_id).await?;
    info!(op = "delete_folder", user_id = %principal.user_id, folder_id = %id, "Folder and contained notes deleted");
    Ok(Json(json!({ "success": true })))
}
