//! SQLite storage implementation for correspondence.

mod model;
mod repository;

pub use model::LetterDB;
pub use repository::CorrespondenceRepository;
