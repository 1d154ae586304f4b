//! Single-owner record locks.
//!
//! Editable records (draft applications, notes, child accounts) carry a
//! nullable holder and timestamp pair. The guard in this module decides
//! whether an actor may acquire, hold, or release the lock; repositories
//! run the guard inside a serialized write transaction so the decision and
//! the write land atomically.

mod locks_errors;
mod locks_guard;
mod locks_model;

pub use locks_errors::LockError;
pub use locks_guard::{release, try_acquire, LockResult};
pub use locks_model::{same_holder, LockState, Lockable};
