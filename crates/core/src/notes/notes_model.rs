//! Note domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::locks::{LockState, Lockable};

/// A note attached to a filing, editable by the account that wrote it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationNote {
    pub id: String,
    pub application_number: String,
    pub account_id: String,
    pub body: String,
    #[serde(flatten)]
    pub lock: LockState,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Lockable for ApplicationNote {
    fn lock_state(&self) -> &LockState {
        &self.lock
    }

    fn lock_state_mut(&mut self) -> &mut LockState {
        &mut self.lock
    }

    fn lock_label(&self) -> String {
        format!("note {}", self.id)
    }
}

/// Input model for creating a note.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub application_number: String,
    pub account_id: String,
    pub body: String,
}

impl NewNote {
    pub fn validate(&self) -> Result<()> {
        if self.application_number.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Application number cannot be empty".to_string(),
            )));
        }
        if self.body.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Note body cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating a note.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteUpdate {
    pub id: Option<String>,
    pub body: String,
}

impl NoteUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Note ID is required for updates".to_string(),
            )));
        }
        if self.body.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Note body cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}
