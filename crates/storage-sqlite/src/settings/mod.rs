//! SQLite storage implementation for settings.

mod repository;

pub use repository::SettingsRepository;
