//! Repository traits for scrivano's entity store.
//!
//! These traits define the store's contract so a durable backing can be
//! substituted without touching the HTTP layer. Every note and folder
//! operation is owner-scoped: the caller-supplied `user_id` must equal the
//! record's stored owner or the operation reports [`crate::Error::NotFound`].

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

/// Repository for user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by id.
    async fn get(&self, id: Uuid) -> Result<User>;

    /// Fetch the first user with a matching username.
    async fn get_by_username(&self, username: &str) -> Result<User>;

    /// Create a user with a generated id. No uniqueness check on username.
    async fn create(&self, req: CreateUser) -> Result<User>;
}

/// Repository for note CRUD, owner-scoped throughout.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List all notes owned by `user_id`, most recent activity first
    /// (updated_at when present, else created_at, descending).
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Note>>;

    /// Fetch a note only if both id and owner match.
    async fn get(&self, id: Uuid, user_id: &str) -> Result<Note>;

    /// Create a note with a generated id and fresh timestamps. A missing
    /// folder reference defaults to none.
    async fn create(&self, user_id: &str, req: CreateNote) -> Result<Note>;

    /// Merge partial fields into an owned note, refreshing `updated_at`.
    /// Not-owned or absent notes report NotFound with no mutation.
    async fn update(&self, id: Uuid, user_id: &str, req: UpdateNote) -> Result<Note>;

    /// Remove an owned note.
    async fn delete(&self, id: Uuid, user_id: &str) -> Result<()>;
}

/// Repository for folder CRUD, owner-scoped throughout.
#[async_trait]
pub trait FolderRepository: Send + Sync {
    /// List all folders owned by `user_id`, ordered lexicographically by name.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Folder>>;

    /// Fetch a folder only if both id and owner match.
    async fn get(&self, id: Uuid, user_id: &str) -> Result<Folder>;

    /// Create a folder with a generated id and creation timestamp.
    async fn create(&self, user_id: &str, req: CreateFolder) -> Result<Folder>;

    /// Merge partial fields into an owned folder.
    async fn update(&self, id: Uuid, user_id: &str, req: UpdateFolder) -> Result<Folder>;

    /// Remove an owned folder and, first, every note of the same owner whose
    /// folder reference matches it. Atomic from the caller's perspective.
    async fn delete(&self, id: Uuid, user_id: &str) -> Result<()>;
}
