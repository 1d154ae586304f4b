//! Lock protocol tests against a real SQLite database.
//!
//! These exercise the guarded repository paths end to end: the guard runs
//! inside the writer actor's immediate transaction, so conflicts must both
//! fail loudly and leave every row untouched.

use std::sync::Arc;

use ipdesk_core::applications::{
    ApplicationRepositoryTrait, ApplicationUpdate, IpRightType, NewApplication,
};
use ipdesk_core::errors::{DatabaseError, Error};
use ipdesk_core::locks::LockError;
use ipdesk_core::notes::{NewNote, NoteRepositoryTrait};
use ipdesk_storage_sqlite::applications::ApplicationRepository;
use ipdesk_storage_sqlite::notes::NoteRepository;
use ipdesk_storage_sqlite::{create_pool, run_migrations, spawn_writer, DbPool, WriteHandle};
use tempfile::TempDir;

struct TestDb {
    // Held so the database file outlives the repositories.
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

fn applications(db: &TestDb) -> ApplicationRepository {
    ApplicationRepository::new(db.pool.clone(), db.writer.clone())
}

fn new_application(number: &str) -> NewApplication {
    NewApplication {
        id: None,
        number: number.to_string(),
        ip_right_type: IpRightType::Trademark,
        kind: "REGISTRATION".to_string(),
        account_id: "acct-1".to_string(),
        title: Some("Word mark".to_string()),
        applicant_name: Some("ACME Oy".to_string()),
        payload: Some("{}".to_string()),
    }
}

fn assert_held_by(err: Error, expected: &str) {
    match err {
        Error::Lock(LockError::Held { held_by }) => assert_eq!(held_by, expected),
        other => panic!("expected a lock conflict, got {other}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn acquire_conflict_release_cycle() {
    let db = setup();
    let repo = applications(&db);
    let created = repo.create(new_application("12345678"), "DRAFT").await.unwrap();

    // bob acquires, carol is rejected with bob's identity.
    let locked = repo.acquire_lock(&created.id, "bob").await.unwrap();
    assert_eq!(locked.lock.locked_by.as_deref(), Some("bob"));
    assert!(locked.lock.locked_date.is_some());

    let err = repo.acquire_lock(&created.id, "carol").await.unwrap_err();
    assert_held_by(err, "bob");

    // Stored row is unchanged by the failed attempt.
    let stored = repo.get_by_id(&created.id).unwrap();
    assert_eq!(stored.lock.locked_by.as_deref(), Some("bob"));

    // Re-acquire by the holder refreshes, case-insensitively.
    let refreshed = repo.acquire_lock(&created.id, " BOB ").await.unwrap();
    assert_eq!(refreshed.lock.locked_by.as_deref(), Some(" BOB "));

    // carol cannot release either; bob can, clearing both fields.
    let err = repo.release_lock(&created.id, "carol").await.unwrap_err();
    assert_held_by(err, " BOB ");

    let released = repo.release_lock(&created.id, "bob").await.unwrap();
    assert_eq!(released.lock.locked_by, None);
    assert_eq!(released.lock.locked_date, None);

    // Release of an unlocked record is "ensure unlocked".
    let again = repo.release_lock(&created.id, "carol").await.unwrap();
    assert_eq!(again.lock.locked_by, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn not_found_and_locked_are_distinct_outcomes() {
    let db = setup();
    let repo = applications(&db);
    let created = repo.create(new_application("12345678"), "DRAFT").await.unwrap();
    repo.acquire_lock(&created.id, "bob").await.unwrap();

    let absent = repo.acquire_lock("no-such-id", "carol").await.unwrap_err();
    assert!(matches!(
        absent,
        Error::Database(DatabaseError::NotFound(_))
    ));

    let held = repo.acquire_lock(&created.id, "carol").await.unwrap_err();
    assert!(matches!(held, Error::Lock(LockError::Held { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn bulk_lock_rolls_back_on_first_conflict() {
    let db = setup();
    let repo = applications(&db);
    let first = repo.create(new_application("12345678"), "DRAFT").await.unwrap();
    let second = repo.create(new_application("12345678"), "DRAFT").await.unwrap();
    let third = repo.create(new_application("12345678"), "DRAFT").await.unwrap();

    repo.acquire_lock(&second.id, "dave").await.unwrap();

    let err = repo
        .acquire_lock_by_number("12345678", "erin")
        .await
        .unwrap_err();
    assert_held_by(err, "dave");

    // The transaction rolled back: the other two rows are still unlocked.
    assert_eq!(repo.get_by_id(&first.id).unwrap().lock.locked_by, None);
    assert_eq!(
        repo.get_by_id(&second.id).unwrap().lock.locked_by.as_deref(),
        Some("dave")
    );
    assert_eq!(repo.get_by_id(&third.id).unwrap().lock.locked_by, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn bulk_lock_and_release_cover_every_row() {
    let db = setup();
    let repo = applications(&db);
    repo.create(new_application("87654321"), "DRAFT").await.unwrap();
    repo.create(new_application("87654321"), "DRAFT").await.unwrap();

    let locked = repo
        .acquire_lock_by_number("87654321", "erin")
        .await
        .unwrap();
    assert_eq!(locked.len(), 2);
    assert!(locked
        .iter()
        .all(|a| a.lock.locked_by.as_deref() == Some("erin")));

    let released = repo
        .release_lock_by_number("87654321", "ERIN")
        .await
        .unwrap();
    assert_eq!(released.len(), 2);
    assert!(released.iter().all(|a| a.lock.locked_by.is_none()));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_draft_is_guarded_and_releases_the_lock() {
    let db = setup();
    let repo = applications(&db);
    let created = repo.create(new_application("12345678"), "DRAFT").await.unwrap();
    repo.acquire_lock(&created.id, "bob").await.unwrap();

    // A non-holder cannot save.
    let err = repo
        .update_draft(
            ApplicationUpdate {
                id: Some(created.id.clone()),
                title: Some("hijack".to_string()),
                applicant_name: None,
                payload: None,
            },
            "carol",
        )
        .await
        .unwrap_err();
    assert_held_by(err, "bob");
    assert_eq!(
        repo.get_by_id(&created.id).unwrap().title.as_deref(),
        Some("Word mark")
    );

    // The holder's save lands and releases the lock in the same write.
    let updated = repo
        .update_draft(
            ApplicationUpdate {
                id: Some(created.id.clone()),
                title: Some("Figurative mark".to_string()),
                applicant_name: Some("ACME Oy".to_string()),
                payload: Some("{\"classes\":[9,42]}".to_string()),
            },
            "bob",
        )
        .await
        .unwrap();
    assert_eq!(updated.title.as_deref(), Some("Figurative mark"));
    assert_eq!(updated.lock.locked_by, None);
    assert_eq!(updated.lock.locked_date, None);

    let stored = repo.get_by_id(&created.id).unwrap();
    assert_eq!(stored.lock.locked_by, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_draft_is_guarded() {
    let db = setup();
    let repo = applications(&db);
    let created = repo.create(new_application("12345678"), "DRAFT").await.unwrap();
    repo.acquire_lock(&created.id, "bob").await.unwrap();

    let err = repo.delete_draft(&created.id, "carol").await.unwrap_err();
    assert_held_by(err, "bob");
    assert!(repo.get_by_id(&created.id).is_ok());

    repo.delete_draft(&created.id, "bob").await.unwrap();
    assert!(repo.get_by_id(&created.id).is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn note_lock_protocol_matches_applications() {
    let db = setup();
    let repo = NoteRepository::new(db.pool.clone(), db.writer.clone());
    let note = repo
        .insert(NewNote {
            application_number: "12345678".to_string(),
            account_id: "acct-1".to_string(),
            body: "call the examiner".to_string(),
        })
        .await
        .unwrap();

    repo.acquire_lock(&note.id, "alice").await.unwrap();
    let err = repo.acquire_lock(&note.id, "bob").await.unwrap_err();
    assert_held_by(err, "alice");

    let updated = repo
        .update(
            ipdesk_core::notes::NoteUpdate {
                id: Some(note.id.clone()),
                body: "examiner called back".to_string(),
            },
            "ALICE",
        )
        .await
        .unwrap();
    assert_eq!(updated.body, "examiner called back");
    assert_eq!(updated.lock.locked_by, None);
}
