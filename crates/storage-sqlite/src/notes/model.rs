//! Database model for notes.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use ipdesk_core::locks::LockState;
use ipdesk_core::notes::{ApplicationNote, NewNote};

/// Database model for application notes.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::application_notes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ApplicationNoteDB {
    pub id: String,
    pub application_number: String,
    pub account_id: String,
    pub body: String,
    pub locked_by: Option<String>,
    pub locked_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ApplicationNoteDB> for ApplicationNote {
    fn from(db: ApplicationNoteDB) -> Self {
        Self {
            id: db.id,
            application_number: db.application_number,
            account_id: db.account_id,
            body: db.body,
            lock: LockState {
                locked_by: db.locked_by,
                locked_date: db.locked_date,
            },
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewNote> for ApplicationNoteDB {
    fn from(domain: NewNote) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            application_number: domain.application_number,
            account_id: domain.account_id,
            body: domain.body,
            locked_by: None,
            locked_date: None,
            created_at: now,
            updated_at: now,
        }
    }
}
