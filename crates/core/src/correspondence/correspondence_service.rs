use std::sync::Arc;

use async_trait::async_trait;

use super::correspondence_model::{Letter, NewLetter};
use super::correspondence_traits::{CorrespondenceRepositoryTrait, CorrespondenceServiceTrait};
use crate::errors::Result;

/// Service for listing and reading letters.
pub struct CorrespondenceService {
    repository: Arc<dyn CorrespondenceRepositoryTrait>,
}

impl CorrespondenceService {
    pub fn new(repository: Arc<dyn CorrespondenceRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CorrespondenceServiceTrait for CorrespondenceService {
    fn list_letters(&self, account_id: &str, unread_only: bool) -> Result<Vec<Letter>> {
        self.repository.list_by_account(account_id, unread_only)
    }

    fn list_for_application(&self, application_number: &str) -> Result<Vec<Letter>> {
        self.repository.list_by_application(application_number)
    }

    async fn record_letter(&self, new_letter: NewLetter) -> Result<Letter> {
        new_letter.validate()?;
        self.repository.insert(new_letter).await
    }

    async fn mark_read(&self, letter_id: &str) -> Result<Letter> {
        self.repository.mark_read(letter_id).await
    }
}
