use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::notes_model::{ApplicationNote, NewNote, NoteUpdate};
use super::notes_traits::{NoteRepositoryTrait, NoteServiceTrait};
use crate::errors::Result;

/// Service for managing filing notes.
pub struct NoteService {
    repository: Arc<dyn NoteRepositoryTrait>,
}

impl NoteService {
    pub fn new(repository: Arc<dyn NoteRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl NoteServiceTrait for NoteService {
    fn list_notes(&self, application_number: &str) -> Result<Vec<ApplicationNote>> {
        self.repository.list_by_number(application_number)
    }

    async fn add_note(&self, new_note: NewNote) -> Result<ApplicationNote> {
        new_note.validate()?;
        self.repository.insert(new_note).await
    }

    async fn update_note(&self, update: NoteUpdate, actor: &str) -> Result<ApplicationNote> {
        update.validate()?;
        self.repository.update(update, actor).await
    }

    async fn delete_note(&self, note_id: &str, actor: &str) -> Result<()> {
        debug!("deleting note {} as '{}'", note_id, actor);
        self.repository.delete(note_id, actor).await
    }

    async fn lock_note(&self, note_id: &str, actor: &str) -> Result<ApplicationNote> {
        self.repository.acquire_lock(note_id, actor).await
    }

    async fn unlock_note(&self, note_id: &str, actor: &str) -> Result<ApplicationNote> {
        self.repository.release_lock(note_id, actor).await
    }
}
