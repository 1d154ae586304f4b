//! Correspondence domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// A letter delivered to a user-area account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Letter {
    pub id: String,
    pub account_id: String,
    /// Filing the letter concerns, when it concerns one.
    pub application_number: Option<String>,
    pub subject: String,
    pub body: String,
    pub received_at: NaiveDateTime,
    /// Set the first time the account opens the letter.
    pub read_at: Option<NaiveDateTime>,
}

impl Letter {
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}

/// Input model for recording a letter (office-side import).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLetter {
    pub account_id: String,
    pub application_number: Option<String>,
    pub subject: String,
    pub body: String,
}

impl NewLetter {
    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account id cannot be empty".to_string(),
            )));
        }
        if self.subject.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Letter subject cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}
