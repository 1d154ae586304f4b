#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use crate::applications::{
        Application, ApplicationRepositoryTrait, ApplicationSearchQuery,
        ApplicationSearchResponse, ApplicationUpdate, IpRightType, NewApplication,
    };
    use crate::errors::{DatabaseError, Error, Result};
    use crate::locks::{self, LockState};
    use crate::settings::{Settings, SettingsServiceTrait, SettingsUpdate};
    use crate::signatures::{
        Envelope, EnvelopeRequest, SignatureError, SignatureOutcome, SignaturePlatformClient,
        SignatureService, SignatureServiceTrait, SignatureState, SignatureStatus,
    };

    fn ts() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn draft(id: &str) -> Application {
        Application {
            id: id.to_string(),
            number: "12345678".to_string(),
            ip_right_type: IpRightType::Design,
            kind: "REGISTRATION".to_string(),
            status: "DRAFT".to_string(),
            account_id: "acct-1".to_string(),
            title: Some("Chair design".to_string()),
            applicant_name: None,
            payload: None,
            lock: LockState::unlocked(),
            signature: SignatureState::default(),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn not_found(what: &str) -> Error {
        Error::Database(DatabaseError::NotFound(what.to_string()))
    }

    struct MockApplications {
        rows: Arc<Mutex<Vec<Application>>>,
    }

    #[async_trait]
    impl ApplicationRepositoryTrait for MockApplications {
        fn get_by_id(&self, application_id: &str) -> Result<Application> {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.id == application_id)
                .cloned()
                .ok_or_else(|| not_found(application_id))
        }

        fn list_by_number(&self, _number: &str) -> Result<Vec<Application>> {
            unimplemented!()
        }

        fn find_by_envelope_id(&self, envelope_id: &str) -> Result<Application> {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.signature.envelope_id.as_deref() == Some(envelope_id))
                .cloned()
                .ok_or_else(|| not_found(envelope_id))
        }

        fn search(&self, _query: ApplicationSearchQuery) -> Result<ApplicationSearchResponse> {
            unimplemented!()
        }

        async fn create(&self, _new: NewApplication, _status: &str) -> Result<Application> {
            unimplemented!()
        }

        async fn update_draft(
            &self,
            _update: ApplicationUpdate,
            _actor: &str,
        ) -> Result<Application> {
            unimplemented!()
        }

        async fn delete_draft(&self, _application_id: &str, _actor: &str) -> Result<()> {
            unimplemented!()
        }

        async fn set_status(
            &self,
            _application_id: &str,
            _status: &str,
            _actor: &str,
        ) -> Result<Application> {
            unimplemented!()
        }

        async fn set_signature_state(
            &self,
            application_id: &str,
            signature: SignatureState,
        ) -> Result<Application> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|a| a.id == application_id)
                .ok_or_else(|| not_found(application_id))?;
            row.signature = signature;
            Ok(row.clone())
        }

        async fn acquire_lock(&self, application_id: &str, actor: &str) -> Result<Application> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|a| a.id == application_id)
                .ok_or_else(|| not_found(application_id))?;
            locks::try_acquire(row, actor, ts())?;
            Ok(row.clone())
        }

        async fn release_lock(&self, _application_id: &str, _actor: &str) -> Result<Application> {
            unimplemented!()
        }

        async fn acquire_lock_by_number(
            &self,
            _number: &str,
            _actor: &str,
        ) -> Result<Vec<Application>> {
            unimplemented!()
        }

        async fn release_lock_by_number(
            &self,
            _number: &str,
            _actor: &str,
        ) -> Result<Vec<Application>> {
            unimplemented!()
        }
    }

    struct MockSettings;

    #[async_trait]
    impl SettingsServiceTrait for MockSettings {
        fn get_settings(&self) -> Result<Settings> {
            unimplemented!()
        }

        async fn update_settings(&self, _update: &SettingsUpdate) -> Result<()> {
            unimplemented!()
        }

        fn draft_statuses(&self) -> Result<Vec<String>> {
            Ok(vec!["DRAFT".to_string()])
        }

        fn is_draft_status(&self, status: &str) -> Result<bool> {
            Ok(status == "DRAFT")
        }

        fn initial_draft_status(&self) -> Result<String> {
            Ok("DRAFT".to_string())
        }

        fn submitted_status(&self) -> Result<String> {
            Ok("SUBMITTED".to_string())
        }

        fn base_currency(&self) -> Result<String> {
            Ok("EUR".to_string())
        }
    }

    struct MockPlatform;

    #[async_trait]
    impl SignaturePlatformClient for MockPlatform {
        async fn create_envelope(&self, request: &EnvelopeRequest) -> Result<Envelope> {
            Ok(Envelope {
                id: format!("env-{}", request.application_id),
                signing_url: "https://sign.example/session".to_string(),
            })
        }
    }

    fn service(rows: Vec<Application>) -> (SignatureService, Arc<MockApplications>) {
        let repo = Arc::new(MockApplications {
            rows: Arc::new(Mutex::new(rows)),
        });
        let service = SignatureService::new(repo.clone(), Arc::new(MockPlatform), Arc::new(MockSettings));
        (service, repo)
    }

    #[tokio::test]
    async fn request_signature_locks_the_draft_and_stores_the_envelope() {
        let (service, repo) = service(vec![draft("a1")]);

        let session = service.request_signature("a1", "bob").await.unwrap();
        assert_eq!(session.signing_url, "https://sign.example/session");
        assert_eq!(
            session.application.signature.status,
            SignatureStatus::Requested
        );
        assert_eq!(
            session.application.signature.envelope_id.as_deref(),
            Some("env-a1")
        );

        // The lock stays held while the signature is pending.
        let stored = repo.get_by_id("a1").unwrap();
        assert_eq!(stored.lock.locked_by.as_deref(), Some("bob"));
    }

    #[tokio::test]
    async fn request_signature_rejects_pending_and_submitted_applications() {
        let mut pending = draft("a1");
        pending.signature.status = SignatureStatus::Requested;
        pending.signature.envelope_id = Some("env-a1".to_string());
        let mut submitted = draft("a2");
        submitted.status = "SUBMITTED".to_string();
        let (service, _) = service(vec![pending, submitted]);

        let err = service.request_signature("a1", "bob").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Signature(SignatureError::AlreadyRequested(_))
        ));

        let err = service.request_signature("a2", "bob").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn confirm_signature_records_signer_and_is_idempotent() {
        let (service, _) = service(vec![draft("a1")]);
        service.request_signature("a1", "bob").await.unwrap();

        let signed = service
            .confirm_signature("env-a1", SignatureOutcome::Signed, Some("Bob B".to_string()))
            .await
            .unwrap();
        assert_eq!(signed.signature.status, SignatureStatus::Signed);
        assert_eq!(signed.signature.signer.as_deref(), Some("Bob B"));
        assert!(signed.signature.signed_at.is_some());

        let again = service
            .confirm_signature("env-a1", SignatureOutcome::Signed, Some("Bob B".to_string()))
            .await
            .unwrap();
        assert_eq!(again.signature.signed_at, signed.signature.signed_at);
    }

    #[tokio::test]
    async fn confirm_of_unknown_envelope_is_not_found() {
        let (service, _) = service(vec![draft("a1")]);
        let err = service
            .confirm_signature("env-unknown", SignatureOutcome::Signed, None)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn declined_envelope_can_be_requested_again() {
        let (service, _) = service(vec![draft("a1")]);
        service.request_signature("a1", "bob").await.unwrap();
        let declined = service
            .confirm_signature("env-a1", SignatureOutcome::Declined, None)
            .await
            .unwrap();
        assert_eq!(declined.signature.status, SignatureStatus::Declined);

        // The same holder can start over.
        let session = service.request_signature("a1", "bob").await.unwrap();
        assert_eq!(
            session.application.signature.status,
            SignatureStatus::Requested
        );
    }
}
