//! Signature domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Where an application stands in the signature flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureStatus {
    #[default]
    NotRequested,
    Requested,
    Signed,
    Declined,
}

impl SignatureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureStatus::NotRequested => "NOT_REQUESTED",
            SignatureStatus::Requested => "REQUESTED",
            SignatureStatus::Signed => "SIGNED",
            SignatureStatus::Declined => "DECLINED",
        }
    }

    /// Parse a stored status string; unknown values fall back to
    /// `NotRequested` so a schema addition cannot brick existing rows.
    pub fn from_str_lossy(value: &str) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "REQUESTED" => SignatureStatus::Requested,
            "SIGNED" => SignatureStatus::Signed,
            "DECLINED" => SignatureStatus::Declined,
            _ => SignatureStatus::NotRequested,
        }
    }
}

/// Signature fields embedded in an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureState {
    pub status: SignatureStatus,
    /// Envelope identifier in the signature platform, present once a
    /// signature has been requested.
    pub envelope_id: Option<String>,
    pub signed_at: Option<NaiveDateTime>,
    /// Identity reported by the platform for the completed signature.
    pub signer: Option<String>,
}

/// Outcome reported by the platform's confirmation callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureOutcome {
    Signed,
    Declined,
}

/// Payload sent to the platform when creating an envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeRequest {
    pub application_id: String,
    pub application_number: String,
    pub account_id: String,
    pub title: Option<String>,
}

/// Envelope created by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub id: String,
    pub signing_url: String,
}

/// Result of a signature request: the updated application plus the URL the
/// user is redirected to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningSession {
    pub application: crate::applications::Application,
    pub signing_url: String,
}
