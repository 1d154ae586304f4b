//! Payment repository, gateway client, and service traits.

use async_trait::async_trait;

use super::payments_model::{
    GatewayOrder, GatewayOrderRequest, NewPayment, Payment, PaymentInitiation, PaymentOutcome,
    PaymentStatus,
};
use crate::errors::Result;

/// Trait for payment repository operations.
#[async_trait]
pub trait PaymentRepositoryTrait: Send + Sync {
    fn get_by_id(&self, payment_id: &str) -> Result<Payment>;

    fn get_by_provider_ref(&self, provider_ref: &str) -> Result<Payment>;

    fn list_by_application(&self, application_id: &str) -> Result<Vec<Payment>>;

    async fn insert(&self, new_payment: NewPayment, currency: &str) -> Result<Payment>;

    async fn set_provider_ref(&self, payment_id: &str, provider_ref: &str) -> Result<Payment>;

    async fn set_status(&self, payment_id: &str, status: PaymentStatus) -> Result<Payment>;
}

/// Outbound client for the external payment gateway.
#[async_trait]
pub trait PaymentGatewayClient: Send + Sync {
    /// Create a checkout order for a pending payment.
    async fn initiate(&self, request: &GatewayOrderRequest) -> Result<GatewayOrder>;
}

/// Trait for payment service operations.
#[async_trait]
pub trait PaymentServiceTrait: Send + Sync {
    fn list_payments(&self, application_id: &str) -> Result<Vec<Payment>>;

    /// Create a pending payment and open a checkout order with the gateway.
    async fn initiate_payment(&self, new_payment: NewPayment) -> Result<PaymentInitiation>;

    /// Confirmation callback from the gateway. Unknown references fail with
    /// NotFound; repeating an identical outcome is a no-op.
    async fn confirm_payment(&self, provider_ref: &str, outcome: PaymentOutcome)
        -> Result<Payment>;
}
