//! Client and service traits for the signature flow.

use async_trait::async_trait;

use super::signatures_model::{
    Envelope, EnvelopeRequest, SignatureOutcome, SigningSession,
};
use crate::applications::Application;
use crate::errors::Result;

/// Outbound client for the external signature platform.
#[async_trait]
pub trait SignaturePlatformClient: Send + Sync {
    /// Create a signing envelope for a draft application.
    async fn create_envelope(&self, request: &EnvelopeRequest) -> Result<Envelope>;
}

/// Service orchestrating the signature flow on top of applications.
#[async_trait]
pub trait SignatureServiceTrait: Send + Sync {
    /// Request a signature for a draft. Acquires the application lock for
    /// `actor` (the lock stays held while the signature is pending) and
    /// returns the platform's signing URL.
    async fn request_signature(&self, application_id: &str, actor: &str)
        -> Result<SigningSession>;

    /// Confirmation callback from the platform. Unknown envelopes fail with
    /// NotFound; repeating an identical outcome is a no-op.
    async fn confirm_signature(
        &self,
        envelope_id: &str,
        outcome: SignatureOutcome,
        signer: Option<String>,
    ) -> Result<Application>;
}
