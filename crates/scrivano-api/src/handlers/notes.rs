//! Note CRUD handlers.
//!
//! Every operation is scoped to the caller's owner key. A note that exists
//! but belongs to someone else is indistinguishable from one that does not
//! exist: both return 404.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use scrivano_core::{CreateNote, Note, UpdateNote};

use crate::auth::Principal;
use crate::error::ApiError;
use crate::AppState;

/// List the caller's notes, most recently updated first.
pub async fn list_notes(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.notes.list_for_user(&principal.user_id).await?;
    Ok(Json(notes))
}

/// Fetch a single note by id.
pub async fn get_note(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<Note>, ApiError> {
    let note = state.notes.get(id, &principal.user_id).await?;
    Ok(Json(note))
}

/// Create a note owned by the caller.
pub async fn create_note(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<CreateNote>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let Json(req) = payload?;
    let note = state.notes.create(&principal.user_id, req).await?;
    info!(op = "create_note", user_id = %principal.user_id, note_id = %note.id, "Note created");
    Ok(Json(note))
}

/// Partially update a note. Only fields present in the body change;
/// `folderId: null` clears the folder reference.
pub async fn update_note(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateNote>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let Json(req) = payload?;
    let note = state.notes.update(id, &principal.user_id, req).await?;
    Ok(Json(note))
}

/// Delete a note.
pub async fn delete_note(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state.notes.delete(id, &principal.user_id).await?;
    info!(op = "delete_note", user_id = %principal.user_id, note_id = %id, "Note deleted");
    Ok(Json(json!({ "success": true })))
}
