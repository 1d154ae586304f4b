use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::child_accounts_model::{ChildAccount, ChildAccountUpdate, NewChildAccount};
use super::child_accounts_traits::{ChildAccountRepositoryTrait, ChildAccountServiceTrait};
use crate::errors::Result;

/// Service for managing child accounts.
pub struct ChildAccountService {
    repository: Arc<dyn ChildAccountRepositoryTrait>,
}

impl ChildAccountService {
    pub fn new(repository: Arc<dyn ChildAccountRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ChildAccountServiceTrait for ChildAccountService {
    fn get_child(&self, child_id: &str) -> Result<ChildAccount> {
        self.repository.get_by_id(child_id)
    }

    fn list_children(&self, parent_account_id: &str) -> Result<Vec<ChildAccount>> {
        self.repository.list_by_parent(parent_account_id)
    }

    async fn create_child(&self, new_child: NewChildAccount) -> Result<ChildAccount> {
        new_child.validate()?;
        debug!(
            "creating child account under {} for {}",
            new_child.parent_account_id, new_child.email
        );
        self.repository.create(new_child).await
    }

    async fn update_child(
        &self,
        update: ChildAccountUpdate,
        actor: &str,
    ) -> Result<ChildAccount> {
        update.validate()?;
        self.repository.update(update, actor).await
    }

    async fn deactivate_child(&self, child_id: &str, actor: &str) -> Result<ChildAccount> {
        debug!("deactivating child account {} as '{}'", child_id, actor);
        self.repository.deactivate(child_id, actor).await
    }

    async fn lock_child(&self, child_id: &str, actor: &str) -> Result<ChildAccount> {
        self.repository.acquire_lock(child_id, actor).await
    }

    async fn unlock_child(&self, child_id: &str, actor: &str) -> Result<ChildAccount> {
        self.repository.release_lock(child_id, actor).await
    }
}
