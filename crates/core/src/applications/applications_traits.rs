//! Application repository and service traits.
//!
//! These traits define the contract for application operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::applications_model::{
    Application, ApplicationSearchQuery, ApplicationSearchResponse, ApplicationUpdate,
    NewApplication,
};
use crate::errors::Result;
use crate::signatures::SignatureState;

/// Trait defining the contract for application repository operations.
///
/// Mutations that depend on the lock state take the acting user: the
/// implementation must run the lock guard and the write atomically (one
/// serialized transaction), so a concurrent editor can never slip between
/// the holder check and the save.
#[async_trait]
pub trait ApplicationRepositoryTrait: Send + Sync {
    /// Retrieves an application by its ID.
    fn get_by_id(&self, application_id: &str) -> Result<Application>;

    /// Lists all rows sharing a filing number.
    fn list_by_number(&self, number: &str) -> Result<Vec<Application>>;

    /// Finds the application carrying a signature envelope.
    fn find_by_envelope_id(&self, envelope_id: &str) -> Result<Application>;

    /// Paginated search over applications.
    fn search(&self, query: ApplicationSearchQuery) -> Result<ApplicationSearchResponse>;

    /// Creates a new application with the given status, unlocked.
    async fn create(&self, new_application: NewApplication, status: &str) -> Result<Application>;

    /// Persists new draft content. Guarded: fails when another actor holds
    /// the lock; the lock is cleared as part of the same save.
    async fn update_draft(&self, update: ApplicationUpdate, actor: &str) -> Result<Application>;

    /// Deletes a draft row. Guarded like `update_draft`.
    async fn delete_draft(&self, application_id: &str, actor: &str) -> Result<()>;

    /// Moves an application to a new status, clearing the lock in the same
    /// save. Guarded like `update_draft`.
    async fn set_status(&self, application_id: &str, status: &str, actor: &str)
        -> Result<Application>;

    /// Replaces the signature fields. Not guarded and leaves the lock as it
    /// is: confirmation callbacks arrive without an acting user.
    async fn set_signature_state(
        &self,
        application_id: &str,
        signature: SignatureState,
    ) -> Result<Application>;

    /// Explicitly acquires the lock for `actor`.
    async fn acquire_lock(&self, application_id: &str, actor: &str) -> Result<Application>;

    /// Explicitly releases the lock held by `actor`.
    async fn release_lock(&self, application_id: &str, actor: &str) -> Result<Application>;

    /// Acquires the lock on every row sharing `number`. The first
    /// conflicting row aborts the whole batch and no row is modified.
    async fn acquire_lock_by_number(&self, number: &str, actor: &str)
        -> Result<Vec<Application>>;

    /// Releases the lock on every row sharing `number`, with the same
    /// all-or-nothing behavior as `acquire_lock_by_number`.
    async fn release_lock_by_number(&self, number: &str, actor: &str)
        -> Result<Vec<Application>>;
}

/// Trait defining the contract for application service operations.
#[async_trait]
pub trait ApplicationServiceTrait: Send + Sync {
    /// Paginated search over the caller's applications.
    fn search_applications(
        &self,
        query: ApplicationSearchQuery,
    ) -> Result<ApplicationSearchResponse>;

    /// Retrieves an application regardless of status.
    fn get_application(&self, application_id: &str) -> Result<Application>;

    /// Retrieves an application that is in an editable status. An
    /// application outside the draft set is reported as not found, so
    /// "absent" and "not editable" are indistinguishable to the caller.
    fn get_draft(&self, application_id: &str) -> Result<Application>;

    /// Creates a draft in the configured initial status.
    async fn create_draft(&self, new_application: NewApplication) -> Result<Application>;

    /// Updates a draft's content, releasing the lock as part of the save.
    async fn update_draft(&self, update: ApplicationUpdate, actor: &str) -> Result<Application>;

    /// Deletes a draft.
    async fn delete_draft(&self, application_id: &str, actor: &str) -> Result<()>;

    /// Submits a signed draft, moving it to the configured submitted status.
    async fn submit_draft(&self, application_id: &str, actor: &str) -> Result<Application>;

    /// Locks a draft for editing by `actor`.
    async fn lock_application(&self, application_id: &str, actor: &str) -> Result<Application>;

    /// Releases the lock on an application.
    async fn unlock_application(&self, application_id: &str, actor: &str) -> Result<Application>;

    /// Locks every row of a filing.
    async fn lock_all_by_number(&self, number: &str, actor: &str) -> Result<Vec<Application>>;

    /// Unlocks every row of a filing.
    async fn unlock_all_by_number(&self, number: &str, actor: &str) -> Result<Vec<Application>>;
}
