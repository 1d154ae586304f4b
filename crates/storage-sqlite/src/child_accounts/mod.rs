//! SQLite storage implementation for child accounts.

mod model;
mod repository;

pub use model::ChildAccountDB;
pub use repository::ChildAccountRepository;
