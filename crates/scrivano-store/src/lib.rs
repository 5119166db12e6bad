//! # scrivano-store
//!
//! In-memory entity store for scrivano: users, notes, and folders behind the
//! repository traits from `scrivano-core`. Volatile by design — state lives
//! for the process lifetime only. The trait seam exists so a durable backing
//! can replace [`MemoryStore`] without touching the HTTP layer.

pub mod memory;

pub use memory::MemoryStore;
