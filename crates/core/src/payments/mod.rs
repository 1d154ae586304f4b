//! Payments module - fee payment through the external payment gateway.

mod payments_client;
mod payments_errors;
mod payments_model;
mod payments_service;
mod payments_traits;

pub use payments_client::HttpPaymentGatewayClient;
pub use payments_errors::PaymentError;
pub use payments_model::{
    GatewayOrder, GatewayOrderRequest, NewPayment, Payment, PaymentInitiation, PaymentOutcome,
    PaymentStatus,
};
pub use payments_service::PaymentService;
pub use payments_traits::{PaymentGatewayClient, PaymentRepositoryTrait, PaymentServiceTrait};
