//! Signatures module - document signature orchestration.
//!
//! Drafts are signed through an external signature platform: the backend
//! creates an envelope, the user signs in the platform's UI, and the
//! platform confirms the outcome through a callback.

mod signatures_client;
mod signatures_errors;
mod signatures_model;
mod signatures_service;
mod signatures_traits;

#[cfg(test)]
mod signatures_service_tests;

pub use signatures_client::HttpSignaturePlatformClient;
pub use signatures_errors::SignatureError;
pub use signatures_model::{
    Envelope, EnvelopeRequest, SignatureOutcome, SignatureState, SignatureStatus, SigningSession,
};
pub use signatures_service::SignatureService;
pub use signatures_traits::{SignaturePlatformClient, SignatureServiceTrait};
