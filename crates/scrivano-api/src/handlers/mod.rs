//! HTTP handlers, grouped by resource.

pub mod analysis;
pub mod folders;
pub mod notes;
