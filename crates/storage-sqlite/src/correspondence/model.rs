//! Database model for letters.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use ipdesk_core::correspondence::{Letter, NewLetter};

/// Database model for letters.
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
#[diesel(table_name = crate::schema::letters)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LetterDB {
    pub id: String,
    pub account_id: String,
    pub application_number: Option<String>,
    pub subject: String,
    pub body: String,
    pub received_at: NaiveDateTime,
    pub read_at: Option<NaiveDateTime>,
}

impl From<LetterDB> for Letter {
    fn from(db: LetterDB) -> Self {
        Self {
            id: db.id,
            account_id: db.account_id,
            application_number: db.application_number,
            subject: db.subject,
            body: db.body,
            received_at: db.received_at,
            read_at: db.read_at,
        }
    }
}

impl From<NewLetter> for LetterDB {
    fn from(domain: NewLetter) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            account_id: domain.account_id,
            application_number: domain.application_number,
            subject: domain.subject,
            body: domain.body,
            received_at: chrono::Utc::now().naive_utc(),
            read_at: None,
        }
    }
}
