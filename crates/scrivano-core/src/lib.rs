//! # scrivano-core
//!
//! Core types, traits, and abstractions shared by every scrivano crate:
//!
//! - Domain models (users, notes, folders, analysis results)
//! - The [`Error`]/[`Result`] pair used across the workspace
//! - Repository traits the entity store implements
//! - Environment and upload-policy defaults
//! - Structured logging field constants

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;

pub use error::{Error, Result};
pub use models::{
    AiAnalysis, AnalysisKind, CreateFolder, CreateNote, CreateUser, Folder, Note, UpdateFolder,
    UpdateNote, User,
};
pub use traits::{FolderRepository, NoteRepository, UserRepository};
