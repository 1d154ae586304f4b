//! Errors raised by the lock guard.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LockError {
    /// Another actor holds the lock. Never retried; the caller surfaces the
    /// holder's identity to the user.
    #[error("record is locked by '{held_by}'")]
    Held { held_by: String },

    /// The actor identifier was empty after trimming.
    #[error("actor identifier must not be empty")]
    EmptyActor,
}
