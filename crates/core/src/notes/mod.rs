//! Notes module - per-filing notes with the single-owner lock protocol.

mod notes_model;
mod notes_service;
mod notes_traits;

pub use notes_model::{ApplicationNote, NewNote, NoteUpdate};
pub use notes_service::NoteService;
pub use notes_traits::{NoteRepositoryTrait, NoteServiceTrait};
