//! The lock guard: gate mutating operations on a record so only the current
//! holder (or nobody, if the record is unlocked) can proceed.

use chrono::NaiveDateTime;
use log::debug;

use super::locks_errors::LockError;
use super::locks_model::{same_holder, Lockable};

pub type LockResult<T> = std::result::Result<T, LockError>;

/// Acquire the lock on `record` for `actor`.
///
/// Succeeds when the record is unlocked or already held by `actor` (holder
/// names compare trimmed and case-insensitive). On success the holder is
/// stored as given and the timestamp is refreshed, so a re-acquire by the
/// current holder is an idempotent refresh. Fails with [`LockError::Held`]
/// when a different actor holds the lock, leaving the record untouched.
pub fn try_acquire<R: Lockable>(
    record: &mut R,
    actor: &str,
    now: NaiveDateTime,
) -> LockResult<()> {
    check_holder(record, actor)?;
    let state = record.lock_state_mut();
    state.locked_by = Some(actor.to_string());
    state.locked_date = Some(now);
    debug!("{} locked by '{}'", record.lock_label(), actor.trim());
    Ok(())
}

/// Release the lock on `record` held by `actor`.
///
/// The precondition is the same as for acquire, so releasing an unlocked
/// record succeeds trivially: release doubles as "ensure unlocked". On
/// success both lock fields are cleared together. Fails with
/// [`LockError::Held`] when a different actor holds the lock.
pub fn release<R: Lockable>(record: &mut R, actor: &str) -> LockResult<()> {
    check_holder(record, actor)?;
    let state = record.lock_state_mut();
    state.locked_by = None;
    state.locked_date = None;
    debug!("{} unlocked", record.lock_label());
    Ok(())
}

/// Shared precondition: the record must be unlocked or held by `actor`.
fn check_holder<R: Lockable>(record: &R, actor: &str) -> LockResult<()> {
    if actor.trim().is_empty() {
        return Err(LockError::EmptyActor);
    }
    if let Some(holder) = record.lock_state().holder() {
        if !same_holder(holder, actor) {
            return Err(LockError::Held {
                held_by: holder.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locks::LockState;
    use chrono::NaiveDate;

    struct Row {
        id: u32,
        lock: LockState,
    }

    impl Row {
        fn unlocked(id: u32) -> Self {
            Self {
                id,
                lock: LockState::unlocked(),
            }
        }

        fn held_by(id: u32, holder: &str) -> Self {
            Self {
                id,
                lock: LockState {
                    locked_by: Some(holder.to_string()),
                    locked_date: Some(ts(1)),
                },
            }
        }
    }

    impl Lockable for Row {
        fn lock_state(&self) -> &LockState {
            &self.lock
        }

        fn lock_state_mut(&mut self) -> &mut LockState {
            &mut self.lock
        }

        fn lock_label(&self) -> String {
            format!("row {}", self.id)
        }
    }

    fn ts(hour: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn acquire_on_unlocked_record_sets_both_fields() {
        let mut row = Row::unlocked(1);
        try_acquire(&mut row, "bob", ts(9)).unwrap();
        assert_eq!(row.lock.locked_by.as_deref(), Some("bob"));
        assert_eq!(row.lock.locked_date, Some(ts(9)));
    }

    #[test]
    fn reacquire_by_holder_is_idempotent_and_refreshes_timestamp() {
        let mut row = Row::unlocked(1);
        try_acquire(&mut row, "bob", ts(9)).unwrap();
        try_acquire(&mut row, "bob", ts(10)).unwrap();
        assert_eq!(row.lock.locked_by.as_deref(), Some("bob"));
        assert_eq!(row.lock.locked_date, Some(ts(10)));
    }

    #[test]
    fn acquire_by_other_actor_fails_and_leaves_record_unchanged() {
        let mut row = Row::held_by(1, "bob");
        let err = try_acquire(&mut row, "carol", ts(10)).unwrap_err();
        assert_eq!(
            err,
            LockError::Held {
                held_by: "bob".to_string()
            }
        );
        assert_eq!(row.lock.locked_by.as_deref(), Some("bob"));
        assert_eq!(row.lock.locked_date, Some(ts(1)));
    }

    #[test]
    fn holder_comparison_ignores_case_and_whitespace() {
        let mut row = Row::unlocked(1);
        try_acquire(&mut row, " Alice ", ts(9)).unwrap();
        try_acquire(&mut row, "ALICE", ts(10)).unwrap();
        assert_eq!(row.lock.locked_by.as_deref(), Some("ALICE"));

        release(&mut row, "alice").unwrap();
        assert!(!row.lock.is_locked());
    }

    #[test]
    fn release_clears_both_fields_together() {
        let mut row = Row::held_by(1, "bob");
        release(&mut row, "bob").unwrap();
        assert_eq!(row.lock.locked_by, None);
        assert_eq!(row.lock.locked_date, None);
    }

    #[test]
    fn release_by_other_actor_fails() {
        let mut row = Row::held_by(1, "bob");
        let err = release(&mut row, "carol").unwrap_err();
        assert_eq!(
            err,
            LockError::Held {
                held_by: "bob".to_string()
            }
        );
        assert!(row.lock.is_locked());
    }

    #[test]
    fn release_of_unlocked_record_is_ensure_unlocked() {
        let mut row = Row::unlocked(1);
        release(&mut row, "bob").unwrap();
        assert_eq!(row.lock, LockState::unlocked());
    }

    #[test]
    fn acquire_then_release_round_trips_to_unlocked() {
        let mut row = Row::unlocked(1);
        try_acquire(&mut row, "dave", ts(9)).unwrap();
        release(&mut row, "dave").unwrap();
        assert_eq!(row.lock, LockState::unlocked());
    }

    #[test]
    fn empty_holder_string_counts_as_unlocked() {
        let mut row = Row::unlocked(1);
        row.lock.locked_by = Some("   ".to_string());
        try_acquire(&mut row, "erin", ts(9)).unwrap();
        assert_eq!(row.lock.locked_by.as_deref(), Some("erin"));
    }

    #[test]
    fn empty_actor_is_rejected() {
        let mut row = Row::unlocked(1);
        assert_eq!(
            try_acquire(&mut row, "  ", ts(9)).unwrap_err(),
            LockError::EmptyActor
        );
        assert_eq!(release(&mut row, "").unwrap_err(), LockError::EmptyActor);
    }
}
