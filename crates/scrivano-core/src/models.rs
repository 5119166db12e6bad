//! Core data models for scrivano.
//!
//! These types are shared across all scrivano crates and represent the core
//! domain entities. Wire types serialize with camelCase field names to match
//! the JSON contract consumed by the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// USER
// =============================================================================

/// A registered user.
///
/// Created once, never mutated or deleted. The password field is carried
/// but unused by any flow; authentication is a trust-on-header placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password: String,
}

/// Request for creating a user. No uniqueness check on username.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
}

// =============================================================================
// NOTE
// =============================================================================

/// A rich-text note.
///
/// `user_id` is the owner key: the literal principal string supplied by the
/// boundary layer. Every read and write of a note is scoped to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub user_id: String,
    /// May be empty; the client substitutes a placeholder on save.
    pub title: String,
    /// HTML string, unbounded.
    pub content: String,
    /// Nullable folder reference. No foreign-key constraint; folder deletion
    /// removes contained notes by explicit scan.
    pub folder_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a note.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNote {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub folder_id: Option<Uuid>,
}

/// Partial update for a note. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNote {
    pub title: Option<String>,
    pub content: Option<String>,
    /// `Some(None)` clears the folder reference; `None` leaves it as-is.
    #[serde(default, with = "double_option")]
    pub folder_id: Option<Option<Uuid>>,
}

/// Serde helper distinguishing "field absent" from "field null" for
/// `Option<Option<T>>` fields.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(de).map(Some)
    }
}

// =============================================================================
// FOLDER
// =============================================================================

/// A folder grouping notes for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a folder.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFolder {
    pub name: String,
}

/// Partial update for a folder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFolder {
    pub name: Option<String>,
}

// =============================================================================
// AI ANALYSIS
// =============================================================================

/// Content kind tag carried on every analysis result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisKind {
    Image,
    Pdf,
    Audio,
    Youtube,
    NoteSummary,
    Error,
}

impl std::fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Pdf => write!(f, "pdf"),
            Self::Audio => write!(f, "audio"),
            Self::Youtube => write!(f, "youtube"),
            Self::NoteSummary => write!(f, "note-summary"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Structured result of an AI content analysis.
///
/// Transient: produced per request, never persisted. Analysis failures are
/// reported in-band with `kind == Error` and `confidence == 0.0`, never as a
/// transport-level failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub summary: String,
    pub key_points: Vec<String>,
    /// Nominally in [0, 1]; provider-supplied values are clamped.
    pub confidence: f32,
    #[serde(rename = "type")]
    pub kind: AnalysisKind,
}

impl AiAnalysis {
    /// The error-shaped result every analysis failure collapses into.
    pub fn failure(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            key_points: Vec::new(),
            confidence: 0.0,
            kind: AnalysisKind::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_serializes_camel_case() {
        let note = Note {
            id: Uuid::nil(),
            user_id: "u1".to_string(),
            title: "Hello".to_string(),
            content: "<p>hi</p>".to_string(),
            folder_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["userId"], "u1");
        assert!(json["folderId"].is_null());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn analysis_kind_wire_values() {
        for (kind, expected) in [
            (AnalysisKind::Image, "\"image\""),
            (AnalysisKind::Pdf, "\"pdf\""),
            (AnalysisKind::Audio, "\"audio\""),
            (AnalysisKind::Youtube, "\"youtube\""),
            (AnalysisKind::NoteSummary, "\"note-summary\""),
            (AnalysisKind::Error, "\"error\""),
        ] {
            assert_eq!(serde_json::to_string(&kind).unwrap(), expected);
        }
    }

    #[test]
    fn analysis_serializes_type_and_key_points() {
        let analysis = AiAnalysis {
            summary: "A dog".to_string(),
            key_points: vec!["brown".to_string(), "sitting".to_string()],
            confidence: 0.9,
            kind: AnalysisKind::Image,
        };

        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["keyPoints"].as_array().unwrap().len(), 2);
        assert_eq!(json["summary"], "A dog");
    }

    #[test]
    fn analysis_failure_shape() {
        let analysis = AiAnalysis::failure("Image analysis failed");
        assert_eq!(analysis.kind, AnalysisKind::Error);
        assert_eq!(analysis.confidence, 0.0);
        assert!(analysis.key_points.is_empty());
        assert!(!analysis.summary.is_empty());
    }

    #[test]
    fn update_note_distinguishes_absent_from_null_folder() {
        let absent: UpdateNote = serde_json::from_str(r#"{"title":"T"}"#).unwrap();
        assert!(absent.folder_id.is_none());

        let null: UpdateNote = serde_json::from_str(r#"{"folderId":null}"#).unwrap();
        assert_eq!(null.folder_id, Some(None));

        let set: UpdateNote =
            serde_json::from_str(&format!(r#"{{"folderId":"{}"}}"#, Uuid::nil())).unwrap();
        assert_eq!(set.folder_id, Some(Some(Uuid::nil())));
    }

    #[test]
    fn create_note_defaults_missing_fields() {
        let req: CreateNote = serde_json::from_str("{}").unwrap();
        assert!(req.title.is_empty());
        assert!(req.content.is_empty());
        assert!(req.folder_id.is_none());
    }
}
