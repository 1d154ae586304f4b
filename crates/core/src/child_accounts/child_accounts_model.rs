//! Child account domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::locks::{LockState, Lockable};

/// What a child account is allowed to do on behalf of its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChildPermission {
    ViewApplications,
    EditDrafts,
    Payments,
    Correspondence,
}

/// A delegated account under a user-area account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildAccount {
    pub id: String,
    pub parent_account_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub permissions: Vec<ChildPermission>,
    pub is_active: bool,
    #[serde(flatten)]
    pub lock: LockState,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Lockable for ChildAccount {
    fn lock_state(&self) -> &LockState {
        &self.lock
    }

    fn lock_state_mut(&mut self) -> &mut LockState {
        &mut self.lock
    }

    fn lock_label(&self) -> String {
        format!("child account {}", self.id)
    }
}

fn validate_email(email: &str) -> Result<()> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Email cannot be empty".to_string(),
        )));
    }
    if !trimmed.contains('@') {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "'{}' is not a valid email address",
            trimmed
        ))));
    }
    Ok(())
}

/// Input model for creating a child account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChildAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub parent_account_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub permissions: Vec<ChildPermission>,
}

impl NewChildAccount {
    pub fn validate(&self) -> Result<()> {
        if self.parent_account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Parent account id cannot be empty".to_string(),
            )));
        }
        validate_email(&self.email)
    }
}

/// Input model for updating a child account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildAccountUpdate {
    pub id: Option<String>,
    pub email: String,
    pub display_name: Option<String>,
    pub permissions: Vec<ChildPermission>,
}

impl ChildAccountUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Child account ID is required for updates".to_string(),
            )));
        }
        validate_email(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_child_account_requires_a_plausible_email() {
        let mut new = NewChildAccount {
            id: None,
            parent_account_id: "acct-1".to_string(),
            email: "agent@example.com".to_string(),
            display_name: None,
            permissions: vec![ChildPermission::ViewApplications],
        };
        assert!(new.validate().is_ok());

        new.email = "not-an-email".to_string();
        assert!(new.validate().is_err());

        new.email = "  ".to_string();
        assert!(new.validate().is_err());
    }
}
