//! Payment flow errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    /// The payment already reached a terminal status that contradicts the
    /// reported outcome.
    #[error("payment {0} is already settled")]
    AlreadySettled(String),

    /// The payment gateway call failed.
    #[error("payment gateway call failed: {0}")]
    Gateway(String),
}
