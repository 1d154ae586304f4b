use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use super::signatures_errors::SignatureError;
use super::signatures_model::{
    EnvelopeRequest, SignatureOutcome, SignatureState, SignatureStatus, SigningSession,
};
use super::signatures_traits::{SignaturePlatformClient, SignatureServiceTrait};
use crate::applications::{Application, ApplicationRepositoryTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::settings::SettingsServiceTrait;

/// Service orchestrating signatures on top of the application repository.
pub struct SignatureService {
    applications: Arc<dyn ApplicationRepositoryTrait>,
    client: Arc<dyn SignaturePlatformClient>,
    settings: Arc<dyn SettingsServiceTrait>,
}

impl SignatureService {
    pub fn new(
        applications: Arc<dyn ApplicationRepositoryTrait>,
        client: Arc<dyn SignaturePlatformClient>,
        settings: Arc<dyn SettingsServiceTrait>,
    ) -> Self {
        Self {
            applications,
            client,
            settings,
        }
    }
}

#[async_trait]
impl SignatureServiceTrait for SignatureService {
    async fn request_signature(
        &self,
        application_id: &str,
        actor: &str,
    ) -> Result<SigningSession> {
        let application = self.applications.get_by_id(application_id)?;
        if !self.settings.is_draft_status(&application.status)? {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "application {} is not editable",
                application_id
            ))));
        }
        match application.signature.status {
            SignatureStatus::Requested | SignatureStatus::Signed => {
                return Err(SignatureError::AlreadyRequested(application.id).into());
            }
            SignatureStatus::NotRequested | SignatureStatus::Declined => {}
        }

        // Hold the edit lock while the signature is pending so nobody can
        // change the form content out from under the envelope.
        let application = self.applications.acquire_lock(application_id, actor).await?;

        let envelope = self
            .client
            .create_envelope(&EnvelopeRequest {
                application_id: application.id.clone(),
                application_number: application.number.clone(),
                account_id: application.account_id.clone(),
                title: application.title.clone(),
            })
            .await?;
        debug!(
            "envelope {} created for application {}",
            envelope.id, application.id
        );

        let updated = self
            .applications
            .set_signature_state(
                application_id,
                SignatureState {
                    status: SignatureStatus::Requested,
                    envelope_id: Some(envelope.id),
                    signed_at: None,
                    signer: None,
                },
            )
            .await?;

        Ok(SigningSession {
            application: updated,
            signing_url: envelope.signing_url,
        })
    }

    async fn confirm_signature(
        &self,
        envelope_id: &str,
        outcome: SignatureOutcome,
        signer: Option<String>,
    ) -> Result<Application> {
        let application = self.applications.find_by_envelope_id(envelope_id)?;

        let target = match outcome {
            SignatureOutcome::Signed => SignatureStatus::Signed,
            SignatureOutcome::Declined => SignatureStatus::Declined,
        };
        if application.signature.status == target {
            debug!(
                "envelope {} already confirmed as {}, ignoring",
                envelope_id,
                target.as_str()
            );
            return Ok(application);
        }
        if application.signature.status != SignatureStatus::Requested {
            warn!(
                "envelope {} confirmed as {} but application {} is {}",
                envelope_id,
                target.as_str(),
                application.id,
                application.signature.status.as_str()
            );
        }

        let signature = match outcome {
            SignatureOutcome::Signed => SignatureState {
                status: SignatureStatus::Signed,
                envelope_id: Some(envelope_id.to_string()),
                signed_at: Some(chrono::Utc::now().naive_utc()),
                signer,
            },
            SignatureOutcome::Declined => SignatureState {
                status: SignatureStatus::Declined,
                envelope_id: Some(envelope_id.to_string()),
                signed_at: None,
                signer: None,
            },
        };
        self.applications
            .set_signature_state(&application.id, signature)
            .await
    }
}
