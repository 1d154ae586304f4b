//! Child account repository and service traits.

use async_trait::async_trait;

use super::child_accounts_model::{ChildAccount, ChildAccountUpdate, NewChildAccount};
use crate::errors::Result;

/// Trait for child account repository operations. Guarded mutations run the
/// lock guard and the write atomically, as for applications.
#[async_trait]
pub trait ChildAccountRepositoryTrait: Send + Sync {
    fn get_by_id(&self, child_id: &str) -> Result<ChildAccount>;

    fn list_by_parent(&self, parent_account_id: &str) -> Result<Vec<ChildAccount>>;

    async fn create(&self, new_child: NewChildAccount) -> Result<ChildAccount>;

    /// Guarded; clears the lock as part of the save.
    async fn update(&self, update: ChildAccountUpdate, actor: &str) -> Result<ChildAccount>;

    /// Guarded; soft delete.
    async fn deactivate(&self, child_id: &str, actor: &str) -> Result<ChildAccount>;

    async fn acquire_lock(&self, child_id: &str, actor: &str) -> Result<ChildAccount>;

    async fn release_lock(&self, child_id: &str, actor: &str) -> Result<ChildAccount>;
}

/// Trait for child account service operations.
#[async_trait]
pub trait ChildAccountServiceTrait: Send + Sync {
    fn get_child(&self, child_id: &str) -> Result<ChildAccount>;

    fn list_children(&self, parent_account_id: &str) -> Result<Vec<ChildAccount>>;

    async fn create_child(&self, new_child: NewChildAccount) -> Result<ChildAccount>;

    async fn update_child(&self, update: ChildAccountUpdate, actor: &str)
        -> Result<ChildAccount>;

    async fn deactivate_child(&self, child_id: &str, actor: &str) -> Result<ChildAccount>;

    async fn lock_child(&self, child_id: &str, actor: &str) -> Result<ChildAccount>;

    async fn unlock_child(&self, child_id: &str, actor: &str) -> Result<ChildAccount>;
}
