//! Map-backed in-memory entity store.
//!
//! `MemoryStore` is the reference implementation of the repository traits:
//! three keyed maps with linear scans, process-lifetime only. Every note and
//! folder operation is owner-scoped; a wrong owner is indistinguishable from
//! an absent record, so record existence never leaks across users.
//!
//! Each operation takes a lock exactly once, so mutations are atomic from
//! the caller's perspective and immediately visible to subsequent reads.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use scrivano_core::{
    CreateFolder, CreateNote, CreateUser, Error, Folder, FolderRepository, Note, NoteRepository,
    Result, UpdateFolder, UpdateNote, User, UserRepository,
};

/// In-memory store holding users, notes, and folders.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    notes: RwLock<HashMap<Uuid, Note>>,
    folders: RwLock<HashMap<Uuid, Folder>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn get(&self, id: Uuid) -> Result<User> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("user {id}")))
    }

    async fn get_by_username(&self, username: &str) -> Result<User> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("user '{username}'")))
    }

    async fn create(&self, req: CreateUser) -> Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            username: req.username,
            password: req.password,
        };
        self.users.write().await.insert(user.id, user.clone());
        debug!(user_id = %user.id, op = "create_user", "User created");
        Ok(user)
    }
}

#[async_trait]
impl NoteRepository for MemoryStore {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Note>> {
        let notes = self.notes.read().await;
        let mut owned: Vec<Note> = notes
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        // Most recent activity first. updated_at is refreshed on every
        // mutation and equals created_at for untouched notes.
        owned.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(owned)
    }

    async fn get(&self, id: Uuid, user_id: &str) -> Result<Note> {
        self.notes
            .read()
            .await
            .get(&id)
            .filter(|n| n.user_id == user_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("note {id}")))
    }

    async fn create(&self, user_id: &str, req: CreateNote) -> Result<Note> {
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            title: req.title,
            content: req.content,
            folder_id: req.folder_id,
            created_at: now,
            updated_at: now,
        };
        self.notes.write().await.insert(note.id, note.clone());
        debug!(note_id = %note.id, user_id, op = "create_note", "Note created");
        Ok(note)
    }

    async fn update(&self, id: Uuid, user_id: &str, req: UpdateNote) -> Result<Note> {
        let mut notes = self.notes.write().await;
        let note = notes
            .get_mut(&id)
            .filter(|n| n.user_id == user_id)
            .ok_or_else(|| Error::NotFound(format!("note {id}")))?;

        if let Some(title) = req.title {
            note.title = title;
        }
        if let Some(content) = req.content {
            note.content = content;
        }
        if let Some(folder_id) = req.folder_id {
            note.folder_id = folder_id;
        }
        note.updated_at = Utc::now();
        Ok(note.clone())
    }

    async fn delete(&self, id: Uuid, user_id: &str) -> Result<()> {
        let mut notes = self.notes.write().await;
        if !notes.get(&id).is_some_and(|n| n.user_id == user_id) {
            return Err(Error::NotFound(format!("note {id}")));
        }
        notes.remove(&id);
        debug!(note_id = %id, user_id, op = "delete_note", "Note deleted");
        Ok(())
    }
}

#[async_trait]
impl FolderRepository for MemoryStore {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Folder>> {
        let folders = self.folders.read().await;
        let mut owned: Vec<Folder> = folders
            .values()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(owned)
    }

    async fn get(&self, id: Uuid, user_id: &str) -> Result<Folder> {
        self.folders
            .read()
            .await
            .get(&id)
            .filter(|f| f.user_id == user_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("folder {id}")))
    }

    async fn create(&self, user_id: &str, req: CreateFolder) -> Result<Folder> {
        let folder = Folder {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            name: req.name,
            created_at: Utc::now(),
        };
        self.folders.write().await.insert(folder.id, folder.clone());
        debug!(folder_id = %folder.id, user_id, op = "create_folder", "Folder created");
        Ok(folder)
    }

    async fn update(&self, id: Uuid, user_id: &str, req: UpdateFolder) -> Result<Folder> {
        let mut folders = self.folders.write().await;
        let folder = folders
            .get_mut(&id)
            .filter(|f| f.user_id == user_id)
            .ok_or_else(|| Error::NotFound(format!("folder {id}")))?;

        if let Some(name) = req.name {
            folder.name = name;
        }
        Ok(folder.clone())
    }

    async fn delete(&self, id: Uuid, user_id: &str) -> Result<()> {
        // Both locks are held for the whole cascade so no reader observes
        // the folder gone while its notes remain.
        let mut folders = self.folders.write().await;
        if !folders.get(&id).is_some_and(|f| f.user_id == user_id) {
            return Err(Error::NotFound(format!("folder {id}")));
        }

        let mut notes = self.notes.write().await;
        notes.retain(|_, n| !(n.user_id == user_id && n.folder_id == Some(id)));
        folders.remove(&id);
        debug!(folder_id = %id, user_id, op = "delete_folder", "Folder deleted with contained notes");
        Ok(())
    }
}
