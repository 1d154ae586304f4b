//! Database model for applications.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use ipdesk_core::applications::{Application, IpRightType, NewApplication};
use ipdesk_core::locks::LockState;
use ipdesk_core::signatures::{SignatureState, SignatureStatus};

/// Database model for applications.
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
#[diesel(table_name = crate::schema::applications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ApplicationDB {
    pub id: String,
    pub number: String,
    pub ip_right_type: String,
    pub kind: String,
    pub status: String,
    pub account_id: String,
    pub title: Option<String>,
    pub applicant_name: Option<String>,
    pub payload: Option<String>,
    pub locked_by: Option<String>,
    pub locked_date: Option<NaiveDateTime>,
    pub signature_status: String,
    pub signature_envelope_id: Option<String>,
    pub signature_signed_at: Option<NaiveDateTime>,
    pub signature_signer: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ApplicationDB {
    /// Builds the row for a freshly created draft: unlocked, signature not
    /// requested.
    pub fn from_new(new: NewApplication, status: &str) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: new
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            number: new.number,
            ip_right_type: new.ip_right_type.as_str().to_string(),
            kind: new.kind,
            status: status.to_string(),
            account_id: new.account_id,
            title: new.title,
            applicant_name: new.applicant_name,
            payload: new.payload,
            locked_by: None,
            locked_date: None,
            signature_status: SignatureStatus::NotRequested.as_str().to_string(),
            signature_envelope_id: None,
            signature_signed_at: None,
            signature_signer: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<ApplicationDB> for Application {
    fn from(db: ApplicationDB) -> Self {
        let ip_right_type = IpRightType::from_str(&db.ip_right_type).unwrap_or_else(|_| {
            log::error!(
                "application {} has unknown IP right type '{}', treating as e-service",
                db.id,
                db.ip_right_type
            );
            IpRightType::Eservice
        });
        Self {
            id: db.id,
            number: db.number,
            ip_right_type,
            kind: db.kind,
            status: db.status,
            account_id: db.account_id,
            title: db.title,
            applicant_name: db.applicant_name,
            payload: db.payload,
            lock: LockState {
                locked_by: db.locked_by,
                locked_date: db.locked_date,
            },
            signature: SignatureState {
                status: SignatureStatus::from_str_lossy(&db.signature_status),
                envelope_id: db.signature_envelope_id,
                signed_at: db.signature_signed_at,
                signer: db.signature_signer,
            },
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
