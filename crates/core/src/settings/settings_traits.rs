//! Repository and service traits for settings.

use async_trait::async_trait;

use crate::errors::Result;
use crate::settings::{Settings, SettingsUpdate};

/// Repository trait for the key-value settings store.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Get a single setting value by key. Fails with NotFound when the key
    /// has never been written.
    fn get_setting(&self, setting_key: &str) -> Result<String>;

    /// Insert or overwrite a single setting.
    async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()>;
}

/// Service trait exposing resolved configuration to the rest of the domain.
#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    /// All configuration values, with defaults for missing keys.
    fn get_settings(&self) -> Result<Settings>;

    /// Apply a partial update.
    async fn update_settings(&self, update: &SettingsUpdate) -> Result<()>;

    /// Statuses in which an application is editable.
    fn draft_statuses(&self) -> Result<Vec<String>>;

    /// Whether `status` belongs to the editable set.
    fn is_draft_status(&self, status: &str) -> Result<bool>;

    /// Status assigned to newly created drafts.
    fn initial_draft_status(&self) -> Result<String>;

    /// Status assigned when a draft is submitted.
    fn submitted_status(&self) -> Result<String>;

    /// Currency used when a payment does not name one.
    fn base_currency(&self) -> Result<String>;
}
