//! Note repository and service traits.

use async_trait::async_trait;

use super::notes_model::{ApplicationNote, NewNote, NoteUpdate};
use crate::errors::Result;

/// Trait for note repository operations. Guarded mutations follow the same
/// contract as the application repository: guard and write run atomically.
#[async_trait]
pub trait NoteRepositoryTrait: Send + Sync {
    fn get_by_id(&self, note_id: &str) -> Result<ApplicationNote>;

    fn list_by_number(&self, application_number: &str) -> Result<Vec<ApplicationNote>>;

    async fn insert(&self, new_note: NewNote) -> Result<ApplicationNote>;

    /// Guarded; clears the lock as part of the save.
    async fn update(&self, update: NoteUpdate, actor: &str) -> Result<ApplicationNote>;

    /// Guarded.
    async fn delete(&self, note_id: &str, actor: &str) -> Result<()>;

    async fn acquire_lock(&self, note_id: &str, actor: &str) -> Result<ApplicationNote>;

    async fn release_lock(&self, note_id: &str, actor: &str) -> Result<ApplicationNote>;
}

/// Trait for note service operations.
#[async_trait]
pub trait NoteServiceTrait: Send + Sync {
    fn list_notes(&self, application_number: &str) -> Result<Vec<ApplicationNote>>;

    async fn add_note(&self, new_note: NewNote) -> Result<ApplicationNote>;

    async fn update_note(&self, update: NoteUpdate, actor: &str) -> Result<ApplicationNote>;

    async fn delete_note(&self, note_id: &str, actor: &str) -> Result<()>;

    async fn lock_note(&self, note_id: &str, actor: &str) -> Result<ApplicationNote>;

    async fn unlock_note(&self, note_id: &str, actor: &str) -> Result<ApplicationNote>;
}
