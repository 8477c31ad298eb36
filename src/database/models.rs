//! Database models
//!
//! Rust structs representing database entities.
//! All models use serde for serialization to the rendering layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A published note.
///
/// The identifier is immutable once created. A note whose text is empty is
/// logically deleted: it is never served, but its row (and therefore its
/// identifier) stays reserved.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: String,
    pub text: String,
    /// Argon2 hash of the owner password. Never serialized, so it cannot
    /// reach the rendering layer.
    #[serde(skip_serializing, default)]
    pub password: String,
    pub published: DateTime<Utc>,
    /// None until the first successful update
    pub edited: Option<DateTime<Utc>>,
    pub views: i64,
}

impl Note {
    /// Whether this note has been edited since publication
    pub fn was_edited(&self) -> bool {
        self.edited.is_some()
    }

    /// Whether this note is logically deleted
    pub fn is_deleted(&self) -> bool {
        self.text.is_empty()
    }
}

/// Create note request
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    /// Client-chosen identifier; allocated by the store when absent
    pub id: Option<String>,
    pub text: String,
    pub password: String,
}

/// Update note request. An empty `text` deletes the note.
#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub id: String,
    pub password: String,
    pub text: String,
}
