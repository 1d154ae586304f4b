//! SQLite storage implementation for notes.

mod model;
mod repository;

pub use model::ApplicationNoteDB;
pub use repository::NoteRepository;
