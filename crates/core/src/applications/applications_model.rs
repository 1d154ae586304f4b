//! Application domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::locks::{LockState, Lockable};
use crate::signatures::SignatureState;

/// The IP right an application concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IpRightType {
    Trademark,
    Design,
    Eservice,
}

impl IpRightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IpRightType::Trademark => "TRADEMARK",
            IpRightType::Design => "DESIGN",
            IpRightType::Eservice => "ESERVICE",
        }
    }
}

impl std::str::FromStr for IpRightType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_uppercase().as_str() {
            "TRADEMARK" => Ok(IpRightType::Trademark),
            "DESIGN" => Ok(IpRightType::Design),
            "ESERVICE" => Ok(IpRightType::Eservice),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown IP right type '{}'",
                other
            )))),
        }
    }
}

impl std::fmt::Display for IpRightType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model representing an application in the user area.
///
/// `number` is the business key shared by all rows belonging to one filing;
/// bulk lock operations address a filing through it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub number: String,
    pub ip_right_type: IpRightType,
    /// Application form kind (e.g. registration, renewal, opposition).
    pub kind: String,
    pub status: String,
    /// The user-area account the application belongs to.
    pub account_id: String,
    pub title: Option<String>,
    pub applicant_name: Option<String>,
    /// Form content as a JSON string.
    pub payload: Option<String>,
    #[serde(flatten)]
    pub lock: LockState,
    pub signature: SignatureState,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Lockable for Application {
    fn lock_state(&self) -> &LockState {
        &self.lock
    }

    fn lock_state_mut(&mut self) -> &mut LockState {
        &mut self.lock
    }

    fn lock_label(&self) -> String {
        format!("application {} ({})", self.id, self.number)
    }
}

/// Input model for creating a new draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub number: String,
    pub ip_right_type: IpRightType,
    pub kind: String,
    pub account_id: String,
    pub title: Option<String>,
    pub applicant_name: Option<String>,
    pub payload: Option<String>,
}

impl NewApplication {
    /// Validates the new application data.
    pub fn validate(&self) -> Result<()> {
        if self.number.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Application number cannot be empty".to_string(),
            )));
        }
        if self.kind.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Application kind cannot be empty".to_string(),
            )));
        }
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account id cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating an existing draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationUpdate {
    pub id: Option<String>,
    pub title: Option<String>,
    pub applicant_name: Option<String>,
    pub payload: Option<String>,
}

impl ApplicationUpdate {
    /// Validates the update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Application ID is required for updates".to_string(),
            )));
        }
        Ok(())
    }
}

/// Sort descriptor for search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sort {
    /// Column key (`date`, `number`, `status`, `title`).
    pub id: String,
    pub desc: bool,
}

/// Search query for the application list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSearchQuery {
    /// Page number, 0-based.
    pub page: i64,
    pub page_size: i64,
    pub account_ids: Option<Vec<String>>,
    pub ip_right_type: Option<IpRightType>,
    pub statuses: Option<Vec<String>>,
    /// Matched against number, title and applicant name.
    pub keyword: Option<String>,
    pub date_from: Option<NaiveDateTime>,
    pub date_to: Option<NaiveDateTime>,
    pub sort: Option<Sort>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSearchResponseMeta {
    pub total_row_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSearchResponse {
    pub data: Vec<Application>,
    pub meta: ApplicationSearchResponseMeta,
}
