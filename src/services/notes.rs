//! Notes service
//!
//! Request-scoped orchestration over the repository. Every operation runs
//! under a storage deadline so a stuck database surfaces as `Timeout`
//! instead of hanging the caller.

use crate::config::STORAGE_TIMEOUT;
use crate::database::{CreateNoteRequest, Note, Repository, UpdateNoteRequest};
use crate::error::{AppError, Result};
use std::future::Future;
use std::time::Duration;

/// Service for managing notes
#[derive(Clone)]
pub struct NotesService {
    repo: Repository,
    deadline: Duration,
}

impl NotesService {
    pub fn new(repo: Repository) -> Self {
        Self::with_deadline(repo, STORAGE_TIMEOUT)
    }

    pub fn with_deadline(repo: Repository, deadline: Duration) -> Self {
        Self { repo, deadline }
    }

    /// Publish a new note
    pub async fn create_note(
        &self,
        id: Option<String>,
        text: String,
        password: String,
    ) -> Result<Note> {
        let req = CreateNoteRequest { id, text, password };

        self.under_deadline(self.repo.create_note(req)).await
    }

    /// Get a note by identifier
    pub async fn get_note(&self, id: &str) -> Result<Note> {
        self.under_deadline(self.repo.get_note(id)).await
    }

    /// Update a note; empty text deletes it
    pub async fn update_note(&self, id: String, password: String, text: String) -> Result<Note> {
        let req = UpdateNoteRequest { id, password, text };

        self.under_deadline(self.repo.update_note(req)).await
    }

    async fn under_deadline<F, T>(&self, op: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.deadline, op).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!("storage operation exceeded {:?} deadline", self.deadline);
                Err(AppError::Timeout)
            }
        }
    }
}
