use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error};

use super::payments_errors::PaymentError;
use super::payments_model::{
    GatewayOrderRequest, NewPayment, Payment, PaymentInitiation, PaymentOutcome, PaymentStatus,
};
use super::payments_traits::{PaymentGatewayClient, PaymentRepositoryTrait, PaymentServiceTrait};
use crate::applications::ApplicationRepositoryTrait;
use crate::errors::Result;
use crate::settings::SettingsServiceTrait;

/// Service for initiating and confirming fee payments.
pub struct PaymentService {
    repository: Arc<dyn PaymentRepositoryTrait>,
    applications: Arc<dyn ApplicationRepositoryTrait>,
    client: Arc<dyn PaymentGatewayClient>,
    settings: Arc<dyn SettingsServiceTrait>,
}

impl PaymentService {
    pub fn new(
        repository: Arc<dyn PaymentRepositoryTrait>,
        applications: Arc<dyn ApplicationRepositoryTrait>,
        client: Arc<dyn PaymentGatewayClient>,
        settings: Arc<dyn SettingsServiceTrait>,
    ) -> Self {
        Self {
            repository,
            applications,
            client,
            settings,
        }
    }
}

#[async_trait]
impl PaymentServiceTrait for PaymentService {
    fn list_payments(&self, application_id: &str) -> Result<Vec<Payment>> {
        self.repository.list_by_application(application_id)
    }

    async fn initiate_payment(&self, new_payment: NewPayment) -> Result<PaymentInitiation> {
        new_payment.validate()?;
        // The application must exist; a payment against a deleted draft is
        // a caller bug surfaced as NotFound.
        let application = self.applications.get_by_id(&new_payment.application_id)?;

        let currency = match new_payment.currency.clone() {
            Some(c) => c,
            None => self.settings.base_currency()?,
        };

        let payment = self.repository.insert(new_payment, &currency).await?;
        debug!(
            "payment {} created for application {}",
            payment.id, application.id
        );

        let order = match self
            .client
            .initiate(&GatewayOrderRequest {
                payment_id: payment.id.clone(),
                application_id: payment.application_id.clone(),
                amount: payment.amount,
                currency: payment.currency.clone(),
            })
            .await
        {
            Ok(order) => order,
            Err(e) => {
                // The row must not stay pending when the gateway never saw
                // the order.
                error!("gateway initiation failed for payment {}: {}", payment.id, e);
                self.repository
                    .set_status(&payment.id, PaymentStatus::Failed)
                    .await?;
                return Err(e);
            }
        };

        let payment = self
            .repository
            .set_provider_ref(&payment.id, &order.provider_ref)
            .await?;

        Ok(PaymentInitiation {
            payment,
            redirect_url: order.redirect_url,
        })
    }

    async fn confirm_payment(
        &self,
        provider_ref: &str,
        outcome: PaymentOutcome,
    ) -> Result<Payment> {
        let payment = self.repository.get_by_provider_ref(provider_ref)?;
        let target = outcome.status();

        if payment.status == target {
            debug!(
                "payment {} already {}, ignoring repeated confirmation",
                payment.id,
                target.as_str()
            );
            return Ok(payment);
        }
        if payment.status.is_terminal() {
            return Err(PaymentError::AlreadySettled(payment.id).into());
        }

        self.repository.set_status(&payment.id, target).await
    }
}
