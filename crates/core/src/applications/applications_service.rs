use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::applications_model::{
    Application, ApplicationSearchQuery, ApplicationSearchResponse, ApplicationUpdate,
    NewApplication,
};
use super::applications_traits::{ApplicationRepositoryTrait, ApplicationServiceTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::settings::SettingsServiceTrait;
use crate::signatures::{SignatureError, SignatureStatus};

/// Service for managing applications.
pub struct ApplicationService {
    repository: Arc<dyn ApplicationRepositoryTrait>,
    settings: Arc<dyn SettingsServiceTrait>,
}

impl ApplicationService {
    pub fn new(
        repository: Arc<dyn ApplicationRepositoryTrait>,
        settings: Arc<dyn SettingsServiceTrait>,
    ) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// Fails with NotFound when `application` is not in an editable status.
    fn ensure_draft(&self, application: &Application) -> Result<()> {
        if self.settings.is_draft_status(&application.status)? {
            Ok(())
        } else {
            Err(Error::Database(DatabaseError::NotFound(format!(
                "application {} is not editable",
                application.id
            ))))
        }
    }
}

#[async_trait]
impl ApplicationServiceTrait for ApplicationService {
    fn search_applications(
        &self,
        query: ApplicationSearchQuery,
    ) -> Result<ApplicationSearchResponse> {
        self.repository.search(query)
    }

    fn get_application(&self, application_id: &str) -> Result<Application> {
        self.repository.get_by_id(application_id)
    }

    fn get_draft(&self, application_id: &str) -> Result<Application> {
        let application = self.repository.get_by_id(application_id)?;
        self.ensure_draft(&application)?;
        Ok(application)
    }

    async fn create_draft(&self, new_application: NewApplication) -> Result<Application> {
        new_application.validate()?;
        let status = self.settings.initial_draft_status()?;
        debug!(
            "creating {} draft for account {}",
            new_application.ip_right_type, new_application.account_id
        );
        self.repository.create(new_application, &status).await
    }

    async fn update_draft(&self, update: ApplicationUpdate, actor: &str) -> Result<Application> {
        update.validate()?;
        let id = update.id.clone().unwrap_or_default();
        let existing = self.get_draft(&id)?;
        debug!("updating draft {} as '{}'", existing.id, actor);
        self.repository.update_draft(update, actor).await
    }

    async fn delete_draft(&self, application_id: &str, actor: &str) -> Result<()> {
        let existing = self.get_draft(application_id)?;
        debug!("deleting draft {} as '{}'", existing.id, actor);
        self.repository.delete_draft(application_id, actor).await
    }

    async fn submit_draft(&self, application_id: &str, actor: &str) -> Result<Application> {
        let draft = self.get_draft(application_id)?;
        if draft.signature.status != SignatureStatus::Signed {
            return Err(SignatureError::NotSigned(draft.id).into());
        }
        let submitted = self.settings.submitted_status()?;
        self.repository
            .set_status(application_id, &submitted, actor)
            .await
    }

    async fn lock_application(&self, application_id: &str, actor: &str) -> Result<Application> {
        let existing = self.get_draft(application_id)?;
        debug!("locking application {} for '{}'", existing.id, actor);
        self.repository.acquire_lock(application_id, actor).await
    }

    async fn unlock_application(&self, application_id: &str, actor: &str) -> Result<Application> {
        // No draft check on release: an application that left the editable
        // set while locked must still be unlockable.
        self.repository.release_lock(application_id, actor).await
    }

    async fn lock_all_by_number(&self, number: &str, actor: &str) -> Result<Vec<Application>> {
        let rows = self.repository.acquire_lock_by_number(number, actor).await?;
        if rows.is_empty() {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "no applications with number {}",
                number
            ))));
        }
        Ok(rows)
    }

    async fn unlock_all_by_number(&self, number: &str, actor: &str) -> Result<Vec<Application>> {
        let rows = self.repository.release_lock_by_number(number, actor).await?;
        if rows.is_empty() {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "no applications with number {}",
                number
            ))));
        }
        Ok(rows)
    }
}
