//! CRUD and search tests for the non-lock repository paths.

use ipdesk_core::applications::{
    ApplicationRepositoryTrait, ApplicationSearchQuery, IpRightType, NewApplication, Sort,
};
use ipdesk_core::child_accounts::{ChildAccountRepositoryTrait, ChildPermission, NewChildAccount};
use ipdesk_core::correspondence::{CorrespondenceRepositoryTrait, NewLetter};
use ipdesk_core::errors::{DatabaseError, Error};
use ipdesk_core::payments::{NewPayment, PaymentRepositoryTrait, PaymentStatus};
use ipdesk_core::settings::SettingsRepositoryTrait;
use ipdesk_storage_sqlite::applications::ApplicationRepository;
use ipdesk_storage_sqlite::child_accounts::ChildAccountRepository;
use ipdesk_storage_sqlite::correspondence::CorrespondenceRepository;
use ipdesk_storage_sqlite::payments::PaymentRepository;
use ipdesk_storage_sqlite::settings::SettingsRepository;
use ipdesk_storage_sqlite::{create_pool, run_migrations, spawn_writer, DbPool, WriteHandle};
use rust_decimal::Decimal;
use tempfile::TempDir;

struct TestDb {
    _dir: TempDir,
    pool: DbPool,
    writer: WriteHandle,
}

fn setup() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let pool = create_pool(db_path.to_str().unwrap()).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer(pool.clone()).unwrap();
    TestDb {
        _dir: dir,
        pool,
        writer,
    }
}

fn new_application(number: &str, ip_right_type: IpRightType, title: &str) -> NewApplication {
    NewApplication {
        id: None,
        number: number.to_string(),
        ip_right_type,
        kind: "REGISTRATION".to_string(),
        account_id: "acct-1".to_string(),
        title: Some(title.to_string()),
        applicant_name: None,
        payload: None,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn search_filters_and_paginates() {
    let db = setup();
    let repo = ApplicationRepository::new(db.pool.clone(), db.writer.clone());

    repo.create(
        new_application("10000001", IpRightType::Trademark, "Coffee brand"),
        "DRAFT",
    )
    .await
    .unwrap();
    repo.create(
        new_application("10000002", IpRightType::Design, "Chair design"),
        "DRAFT",
    )
    .await
    .unwrap();
    repo.create(
        new_application("10000003", IpRightType::Trademark, "Tea brand"),
        "SUBMITTED",
    )
    .await
    .unwrap();

    // Filter by type.
    let response = repo
        .search(ApplicationSearchQuery {
            page: 0,
            page_size: 10,
            account_ids: None,
            ip_right_type: Some(IpRightType::Trademark),
            statuses: None,
            keyword: None,
            date_from: None,
            date_to: None,
            sort: Some(Sort {
                id: "number".to_string(),
                desc: false,
            }),
        })
        .unwrap();
    assert_eq!(response.meta.total_row_count, 2);
    assert_eq!(response.data[0].number, "10000001");

    // Keyword matches the title.
    let response = repo
        .search(ApplicationSearchQuery {
            page: 0,
            page_size: 10,
            account_ids: None,
            ip_right_type: None,
            statuses: None,
            keyword: Some("brand".to_string()),
            date_from: None,
            date_to: None,
            sort: None,
        })
        .unwrap();
    assert_eq!(response.meta.total_row_count, 2);

    // Status filter plus pagination.
    let response = repo
        .search(ApplicationSearchQuery {
            page: 0,
            page_size: 1,
            account_ids: None,
            ip_right_type: None,
            statuses: Some(vec!["DRAFT".to_string()]),
            keyword: None,
            date_from: None,
            date_to: None,
            sort: None,
        })
        .unwrap();
    assert_eq!(response.meta.total_row_count, 2);
    assert_eq!(response.data.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn signature_envelope_lookup_round_trips() {
    let db = setup();
    let repo = ApplicationRepository::new(db.pool.clone(), db.writer.clone());
    let created = repo
        .create(
            new_application("10000001", IpRightType::Trademark, "Coffee brand"),
            "DRAFT",
        )
        .await
        .unwrap();

    let updated = repo
        .set_signature_state(
            &created.id,
            ipdesk_core::signatures::SignatureState {
                status: ipdesk_core::signatures::SignatureStatus::Requested,
                envelope_id: Some("env-42".to_string()),
                signed_at: None,
                signer: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.signature.envelope_id.as_deref(), Some("env-42"));

    let found = repo.find_by_envelope_id("env-42").unwrap();
    assert_eq!(found.id, created.id);
    assert!(repo.find_by_envelope_id("env-unknown").is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn child_account_uniqueness_is_enforced_per_parent() {
    let db = setup();
    let repo = ChildAccountRepository::new(db.pool.clone(), db.writer.clone());

    let new_child = NewChildAccount {
        id: None,
        parent_account_id: "acct-1".to_string(),
        email: "agent@example.com".to_string(),
        display_name: Some("Agent".to_string()),
        permissions: vec![ChildPermission::ViewApplications, ChildPermission::EditDrafts],
    };
    let created = repo.create(new_child.clone()).await.unwrap();
    assert_eq!(created.permissions.len(), 2);
    assert!(created.is_active);

    let err = repo.create(new_child.clone()).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Database(DatabaseError::UniqueViolation(_))
    ));

    // The same email under another parent is fine.
    let mut other_parent = new_child;
    other_parent.parent_account_id = "acct-2".to_string();
    assert!(repo.create(other_parent).await.is_ok());

    let deactivated = repo.deactivate(&created.id, "admin").await.unwrap();
    assert!(!deactivated.is_active);
    assert_eq!(repo.list_by_parent("acct-1").unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn payment_rows_round_trip_decimal_amounts() {
    let db = setup();
    let applications = ApplicationRepository::new(db.pool.clone(), db.writer.clone());
    let application = applications
        .create(
            new_application("10000001", IpRightType::Trademark, "Coffee brand"),
            "DRAFT",
        )
        .await
        .unwrap();

    let repo = PaymentRepository::new(db.pool.clone(), db.writer.clone());
    let payment = repo
        .insert(
            NewPayment {
                application_id: application.id.clone(),
                amount: Decimal::new(23550, 2), // 235.50
                currency: None,
            },
            "EUR",
        )
        .await
        .unwrap();
    assert_eq!(payment.amount, Decimal::new(23550, 2));
    assert_eq!(payment.status, PaymentStatus::Pending);

    let with_ref = repo.set_provider_ref(&payment.id, "order-77").await.unwrap();
    assert_eq!(with_ref.provider_ref.as_deref(), Some("order-77"));

    let paid = repo.set_status(&payment.id, PaymentStatus::Paid).await.unwrap();
    assert_eq!(paid.status, PaymentStatus::Paid);

    let listed = repo.list_by_application(&application.id).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].amount, Decimal::new(23550, 2));

    assert_eq!(
        repo.get_by_provider_ref("order-77").unwrap().id,
        payment.id
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn mark_read_keeps_the_first_timestamp() {
    let db = setup();
    let repo = CorrespondenceRepository::new(db.pool.clone(), db.writer.clone());
    let letter = repo
        .insert(NewLetter {
            account_id: "acct-1".to_string(),
            application_number: Some("10000001".to_string()),
            subject: "Office action".to_string(),
            body: "Please respond within two months.".to_string(),
        })
        .await
        .unwrap();
    assert!(letter.read_at.is_none());

    let read = repo.mark_read(&letter.id).await.unwrap();
    let first_read_at = read.read_at.unwrap();

    let again = repo.mark_read(&letter.id).await.unwrap();
    assert_eq!(again.read_at.unwrap(), first_read_at);

    let unread = repo.list_by_account("acct-1", true).unwrap();
    assert!(unread.is_empty());
    assert_eq!(repo.list_by_application("10000001").unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn settings_upsert_and_missing_key() {
    let db = setup();
    let repo = SettingsRepository::new(db.pool.clone(), db.writer.clone());

    let err = repo.get_setting("draft_statuses").unwrap_err();
    assert!(matches!(
        err,
        Error::Database(DatabaseError::NotFound(_))
    ));

    repo.update_setting("draft_statuses", "[\"DRAFT\"]")
        .await
        .unwrap();
    assert_eq!(repo.get_setting("draft_statuses").unwrap(), "[\"DRAFT\"]");

    repo.update_setting("draft_statuses", "[\"DRAFT\",\"RETURNED\"]")
        .await
        .unwrap();
    assert_eq!(
        repo.get_setting("draft_statuses").unwrap(),
        "[\"DRAFT\",\"RETURNED\"]"
    );
}
