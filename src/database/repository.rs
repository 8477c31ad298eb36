//! Repository layer for note storage
//!
//! Each public operation is a single transaction. Identifier allocation,
//! password checks and the logical-delete sentinel all happen inside the
//! transaction that persists their outcome, so no two operations on the
//! same identifier can interleave.

use super::models::{CreateNoteRequest, Note, UpdateNoteRequest};
use crate::config::{ID_LENGTH, MAX_ID_ATTEMPTS, MAX_TEXT_LEN, MIN_TEXT_LEN};
use crate::error::{AppError, Result};
use crate::{auth, id};
use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::collections::HashMap;

/// Repository for note operations
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new note.
    ///
    /// When the request carries no identifier, one is allocated inside the
    /// insert transaction. An explicit identifier that is already taken,
    /// even by a logically deleted note, fails with `Conflict`.
    pub async fn create_note(&self, req: CreateNoteRequest) -> Result<Note> {
        validate_text(&req.text)?;

        let password_hash = auth::hash_password(&req.password)?;
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let note_id = match req.id {
            Some(requested) => {
                id::validate(&requested)?;
                if id_taken(&mut tx, &requested).await? {
                    return Err(AppError::Conflict(requested));
                }
                requested
            }
            None => allocate_id(&mut tx).await?,
        };

        let inserted = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (id, text, password, published, edited, views)
            VALUES (?, ?, ?, ?, NULL, 0)
            RETURNING *
            "#,
        )
        .bind(&note_id)
        .bind(&req.text)
        .bind(&password_hash)
        .bind(now)
        .fetch_one(&mut *tx)
        .await;

        // The primary key backstops the existence check against a raced
        // insert of the same identifier.
        let note = match inserted {
            Ok(note) => note,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(AppError::Conflict(note_id));
            }
            Err(e) => return Err(e.into()),
        };

        tx.commit().await?;

        tracing::info!("note {} created", note.id);
        Ok(note)
    }

    /// Get a note by identifier.
    ///
    /// Logically deleted notes are reported as not found.
    pub async fn get_note(&self, note_id: &str) -> Result<Note> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            SELECT * FROM notes WHERE id = ? AND text != ''
            "#,
        )
        .bind(note_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(note_id.to_string()))?;

        Ok(note)
    }

    /// Update a note, or delete it when the new text is empty.
    ///
    /// The stored password hash is read and verified inside the same
    /// transaction that writes the new text. A failed password check rolls
    /// the transaction back and leaves the note untouched.
    pub async fn update_note(&self, req: UpdateNoteRequest) -> Result<Note> {
        let deleting = req.text.is_empty();
        if !deleting {
            validate_text(&req.text)?;
        }

        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Note>(
            r#"
            SELECT * FROM notes WHERE id = ? AND text != ''
            "#,
        )
        .bind(&req.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(req.id.clone()))?;

        if !auth::verify_password(&req.password, &current.password) {
            return Err(AppError::Unauthorized);
        }

        let now = Utc::now();

        let note = sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes SET text = ?, edited = ? WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&req.text)
        .bind(now)
        .bind(&req.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        if deleting {
            tracing::info!("note {} deleted", note.id);
        } else {
            tracing::info!("note {} updated", note.id);
        }
        Ok(note)
    }

    /// Apply a batch of pending view increments in one transaction.
    ///
    /// Used only by the view aggregator. Deltas for identifiers that no
    /// longer exist are dropped silently: a note may be deleted between a
    /// view and the flush that records it.
    pub async fn apply_view_delta(&self, deltas: &HashMap<String, u64>) -> Result<()> {
        if deltas.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        for (note_id, count) in deltas {
            sqlx::query("UPDATE notes SET views = views + ? WHERE id = ?")
                .bind(*count as i64)
                .bind(note_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::debug!("applied view deltas for {} notes", deltas.len());
        Ok(())
    }
}

/// Whether any row, live or logically deleted, holds this identifier.
async fn id_taken(tx: &mut Transaction<'_, Sqlite>, note_id: &str) -> Result<bool> {
    let hit: Option<i64> = sqlx::query_scalar("SELECT 1 FROM notes WHERE id = ?")
        .bind(note_id)
        .fetch_optional(&mut **tx)
        .await?;

    Ok(hit.is_some())
}

/// Pick a free random identifier, retrying a bounded number of times.
async fn allocate_id(tx: &mut Transaction<'_, Sqlite>) -> Result<String> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let candidate = id::generate(ID_LENGTH);
        if !id_taken(tx, &candidate).await? {
            return Ok(candidate);
        }
        tracing::warn!("identifier {} already taken, retrying", candidate);
    }

    Err(AppError::Transient(format!(
        "no free identifier after {} attempts",
        MAX_ID_ATTEMPTS
    )))
}

/// Length bound for non-empty note text, counted in characters.
fn validate_text(text: &str) -> Result<()> {
    let len = text.chars().count();
    if !(MIN_TEXT_LEN..=MAX_TEXT_LEN).contains(&len) {
        return Err(AppError::InvalidInput(format!(
            "note length {} not accepted",
            len
        )));
    }
    Ok(())
}
