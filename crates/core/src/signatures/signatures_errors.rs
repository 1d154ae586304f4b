//! Signature flow errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignatureError {
    /// A signature is already pending for the application; the existing
    /// envelope must be confirmed or declined first.
    #[error("signature already requested for application {0}")]
    AlreadyRequested(String),

    /// The operation requires a completed signature.
    #[error("application {0} is not signed")]
    NotSigned(String),

    /// The signature platform call failed.
    #[error("signature platform call failed: {0}")]
    Platform(String),
}
