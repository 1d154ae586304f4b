//! Lock state embedded in lockable records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Lock fields carried by every record participating in the lock protocol.
///
/// Invariant: `locked_by` and `locked_date` are set and cleared together.
/// A record is either unlocked (both `None`) or held by exactly one actor
/// (both `Some`). A stored holder that is empty or whitespace-only counts
/// as unlocked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockState {
    pub locked_by: Option<String>,
    pub locked_date: Option<NaiveDateTime>,
}

impl LockState {
    /// An unlocked state.
    pub fn unlocked() -> Self {
        Self::default()
    }

    /// The current holder, if any.
    pub fn holder(&self) -> Option<&str> {
        self.locked_by
            .as_deref()
            .filter(|holder| !holder.trim().is_empty())
    }

    /// Whether any actor currently holds the lock.
    pub fn is_locked(&self) -> bool {
        self.holder().is_some()
    }
}

/// A record participating in the lock protocol.
pub trait Lockable {
    fn lock_state(&self) -> &LockState;

    fn lock_state_mut(&mut self) -> &mut LockState;

    /// Short description of the record used in log lines.
    fn lock_label(&self) -> String;
}

/// Holder comparison used by the guard: leading/trailing whitespace is
/// ignored and the match is case-insensitive.
pub fn same_holder(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
