use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::settings_traits::{SettingsRepositoryTrait, SettingsServiceTrait};
use crate::constants::{
    DEFAULT_BASE_CURRENCY, DEFAULT_DRAFT_STATUSES, DEFAULT_INITIAL_DRAFT_STATUS,
    DEFAULT_SUBMITTED_STATUS, SETTING_BASE_CURRENCY, SETTING_DRAFT_STATUSES,
    SETTING_INITIAL_DRAFT_STATUS, SETTING_SUBMITTED_STATUS,
};
use crate::errors::{DatabaseError, Error, Result};
use crate::settings::{Settings, SettingsUpdate};

/// Service resolving configuration values from the key-value store.
///
/// Reads go to the repository every time; the settings table is tiny and a
/// cache would have to be invalidated across processes.
pub struct SettingsService {
    repository: Arc<dyn SettingsRepositoryTrait>,
}

impl SettingsService {
    pub fn new(repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Read a key, treating NotFound as "use the default".
    fn get_or_default(&self, key: &str, default: &str) -> Result<String> {
        match self.repository.get_setting(key) {
            Ok(value) => Ok(value),
            Err(Error::Database(DatabaseError::NotFound(_))) => Ok(default.to_string()),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_settings(&self) -> Result<Settings> {
        Ok(Settings {
            draft_statuses: self.draft_statuses()?,
            initial_draft_status: self.initial_draft_status()?,
            submitted_status: self.submitted_status()?,
            base_currency: self.base_currency()?,
        })
    }

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<()> {
        if let Some(ref statuses) = update.draft_statuses {
            let encoded = serde_json::to_string(statuses)?;
            self.repository
                .update_setting(SETTING_DRAFT_STATUSES, &encoded)
                .await?;
        }
        if let Some(ref status) = update.initial_draft_status {
            self.repository
                .update_setting(SETTING_INITIAL_DRAFT_STATUS, status)
                .await?;
        }
        if let Some(ref status) = update.submitted_status {
            self.repository
                .update_setting(SETTING_SUBMITTED_STATUS, status)
                .await?;
        }
        if let Some(ref currency) = update.base_currency {
            self.repository
                .update_setting(SETTING_BASE_CURRENCY, currency)
                .await?;
        }
        debug!("settings updated");
        Ok(())
    }

    fn draft_statuses(&self) -> Result<Vec<String>> {
        match self.repository.get_setting(SETTING_DRAFT_STATUSES) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(Error::Database(DatabaseError::NotFound(_))) => Ok(DEFAULT_DRAFT_STATUSES
                .iter()
                .map(|s| s.to_string())
                .collect()),
            Err(e) => Err(e),
        }
    }

    fn is_draft_status(&self, status: &str) -> Result<bool> {
        Ok(self
            .draft_statuses()?
            .iter()
            .any(|s| s.eq_ignore_ascii_case(status)))
    }

    fn initial_draft_status(&self) -> Result<String> {
        self.get_or_default(SETTING_INITIAL_DRAFT_STATUS, DEFAULT_INITIAL_DRAFT_STATUS)
    }

    fn submitted_status(&self) -> Result<String> {
        self.get_or_default(SETTING_SUBMITTED_STATUS, DEFAULT_SUBMITTED_STATUS)
    }

    fn base_currency(&self) -> Result<String> {
        self.get_or_default(SETTING_BASE_CURRENCY, DEFAULT_BASE_CURRENCY)
    }
}
