//! Shared constants for the ipdesk domain layer.

/// Settings key holding the JSON array of statuses considered editable.
pub const SETTING_DRAFT_STATUSES: &str = "draft_statuses";

/// Settings key for the status assigned to newly created drafts.
pub const SETTING_INITIAL_DRAFT_STATUS: &str = "initial_draft_status";

/// Settings key for the status assigned on submission.
pub const SETTING_SUBMITTED_STATUS: &str = "submitted_status";

/// Settings key for the currency used when a payment does not name one.
pub const SETTING_BASE_CURRENCY: &str = "base_currency";

/// Statuses considered editable when no configuration is stored.
pub const DEFAULT_DRAFT_STATUSES: &[&str] = &["DRAFT", "RETURNED_FOR_CORRECTION"];

/// Status assigned to newly created drafts by default.
pub const DEFAULT_INITIAL_DRAFT_STATUS: &str = "DRAFT";

/// Status assigned on submission by default.
pub const DEFAULT_SUBMITTED_STATUS: &str = "SUBMITTED";

/// Default payment currency.
pub const DEFAULT_BASE_CURRENCY: &str = "EUR";
