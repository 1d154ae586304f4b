//! Settings domain models.

use serde::{Deserialize, Serialize};

/// Resolved configuration values, with defaults applied for missing keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Statuses in which an application is editable.
    pub draft_statuses: Vec<String>,
    /// Status assigned to newly created drafts.
    pub initial_draft_status: String,
    /// Status assigned when a draft is submitted.
    pub submitted_status: String,
    /// Currency used when a payment does not name one.
    pub base_currency: String,
}

/// Partial update of the configuration; `None` fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub draft_statuses: Option<Vec<String>>,
    pub initial_draft_status: Option<String>,
    pub submitted_status: Option<String>,
    pub base_currency: Option<String>,
}
