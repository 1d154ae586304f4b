//! Database model for child accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use ipdesk_core::child_accounts::{ChildAccount, ChildPermission, NewChildAccount};
use ipdesk_core::locks::LockState;

/// Database model for child accounts. Permissions are stored as a JSON
/// array in a text column.
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
#[diesel(table_name = crate::schema::child_accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ChildAccountDB {
    pub id: String,
    pub parent_account_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub permissions: String,
    pub is_active: bool,
    pub locked_by: Option<String>,
    pub locked_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Parses the permissions column, dropping the set on corrupt JSON rather
/// than failing the whole read.
pub fn parse_permissions(child_id: &str, raw: &str) -> Vec<ChildPermission> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        log::error!(
            "child account {} has unreadable permissions '{}': {}",
            child_id,
            raw,
            e
        );
        Vec::new()
    })
}

/// Serializes a permission set for storage.
pub fn encode_permissions(permissions: &[ChildPermission]) -> String {
    serde_json::to_string(permissions).unwrap_or_else(|_| "[]".to_string())
}

impl From<ChildAccountDB> for ChildAccount {
    fn from(db: ChildAccountDB) -> Self {
        let permissions = parse_permissions(&db.id, &db.permissions);
        Self {
            id: db.id,
            parent_account_id: db.parent_account_id,
            email: db.email,
            display_name: db.display_name,
            permissions,
            is_active: db.is_active,
            lock: LockState {
                locked_by: db.locked_by,
                locked_date: db.locked_date,
            },
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewChildAccount> for ChildAccountDB {
    fn from(domain: NewChildAccount) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            parent_account_id: domain.parent_account_id,
            email: domain.email.trim().to_string(),
            display_name: domain.display_name,
            permissions: encode_permissions(&domain.permissions),
            is_active: true,
            locked_by: None,
            locked_date: None,
            created_at: now,
            updated_at: now,
        }
    }
}
