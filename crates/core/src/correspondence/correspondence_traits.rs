//! Correspondence repository and service traits.

use async_trait::async_trait;

use super::correspondence_model::{Letter, NewLetter};
use crate::errors::Result;

/// Trait for correspondence repository operations.
#[async_trait]
pub trait CorrespondenceRepositoryTrait: Send + Sync {
    fn get_by_id(&self, letter_id: &str) -> Result<Letter>;

    fn list_by_account(&self, account_id: &str, unread_only: bool) -> Result<Vec<Letter>>;

    fn list_by_application(&self, application_number: &str) -> Result<Vec<Letter>>;

    async fn insert(&self, new_letter: NewLetter) -> Result<Letter>;

    /// Sets `read_at` if it is not set yet; idempotent, the first timestamp
    /// wins.
    async fn mark_read(&self, letter_id: &str) -> Result<Letter>;
}

/// Trait for correspondence service operations.
#[async_trait]
pub trait CorrespondenceServiceTrait: Send + Sync {
    fn list_letters(&self, account_id: &str, unread_only: bool) -> Result<Vec<Letter>>;

    fn list_for_application(&self, application_number: &str) -> Result<Vec<Letter>>;

    async fn record_letter(&self, new_letter: NewLetter) -> Result<Letter>;

    async fn mark_read(&self, letter_id: &str) -> Result<Letter>;
}
