use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;

use ipdesk_core::child_accounts::{
    ChildAccount, ChildAccountRepositoryTrait, ChildAccountUpdate, NewChildAccount,
};
use ipdesk_core::locks;
use ipdesk_core::Result;

use super::model::{encode_permissions, ChildAccountDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::child_accounts;

/// Repository for managing child account data in the database.
pub struct ChildAccountRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl ChildAccountRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_for_update(conn: &mut SqliteConnection, child_id: &str) -> Result<ChildAccount> {
    let row = child_accounts::table
        .find(child_id)
        .select(ChildAccountDB::as_select())
        .first::<ChildAccountDB>(conn)
        .map_err(StorageError::from)?;
    Ok(row.into())
}

fn persist_lock(conn: &mut SqliteConnection, child: &ChildAccount) -> Result<()> {
    diesel::update(child_accounts::table.find(&child.id))
        .set((
            child_accounts::locked_by.eq(child.lock.locked_by.clone()),
            child_accounts::locked_date.eq(child.lock.locked_date),
        ))
        .execute(conn)
        .map_err(StorageError::from)?;
    Ok(())
}

#[async_trait]
impl ChildAccountRepositoryTrait for ChildAccountRepository {
    fn get_by_id(&self, child_id: &str) -> Result<ChildAccount> {
        let mut conn = get_connection(&self.pool)?;
        let row = child_accounts::table
            .find(child_id)
            .select(ChildAccountDB::as_select())
            .first::<ChildAccountDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(row.into())
    }

    fn list_by_parent(&self, parent_account_id: &str) -> Result<Vec<ChildAccount>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = child_accounts::table
            .filter(child_accounts::parent_account_id.eq(parent_account_id))
            .order((child_accounts::is_active.desc(), child_accounts::email.asc()))
            .select(ChildAccountDB::as_select())
            .load::<ChildAccountDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(ChildAccount::from).collect())
    }

    async fn create(&self, new_child: NewChildAccount) -> Result<ChildAccount> {
        self.writer
            .exec(move |conn| {
                let row: ChildAccountDB = new_child.into();
                // The unique index on (parent, email) turns duplicates into
                // a UniqueViolation.
                diesel::insert_into(child_accounts::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(row.into())
            })
            .await
    }

    async fn update(&self, update: ChildAccountUpdate, actor: &str) -> Result<ChildAccount> {
        let actor = actor.to_string();
        self.writer
            .exec(move |conn| {
                let child_id = update.id.clone().unwrap_or_default();
                let mut child = load_for_update(conn, &child_id)?;
                locks::release(&mut child, &actor)?;

                child.email = update.email.trim().to_string();
                child.display_name = update.display_name;
                child.permissions = update.permissions;
                child.updated_at = Utc::now().naive_utc();

                diesel::update(child_accounts::table.find(&child.id))
                    .set((
                        child_accounts::email.eq(child.email.clone()),
                        child_accounts::display_name.eq(child.display_name.clone()),
                        child_accounts::permissions.eq(encode_permissions(&child.permissions)),
                        child_accounts::locked_by.eq(None::<String>),
                        child_accounts::locked_date.eq(None::<NaiveDateTime>),
                        child_accounts::updated_at.eq(child.updated_at),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(child)
            })
            .await
    }

    async fn deactivate(&self, child_id: &str, actor: &str) -> Result<ChildAccount> {
        let child_id = child_id.to_string();
        let actor = actor.to_string();
        self.writer
            .exec(move |conn| {
                let mut child = load_for_update(conn, &child_id)?;
                locks::release(&mut child, &actor)?;

                child.is_active = false;
                child.updated_at = Utc::now().naive_utc();

                diesel::update(child_accounts::table.find(&child.id))
                    .set((
                        child_accounts::is_active.eq(false),
                        child_accounts::locked_by.eq(None::<String>),
                        child_accounts::locked_date.eq(None::<NaiveDateTime>),
                        child_accounts::updated_at.eq(child.updated_at),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(child)
            })
            .await
    }

    async fn acquire_lock(&self, child_id: &str, actor: &str) -> Result<ChildAccount> {
        let child_id = child_id.to_string();
        let actor = actor.to_string();
        self.writer
            .exec(move |conn| {
                let mut child = load_for_update(conn, &child_id)?;
                locks::try_acquire(&mut child, &actor, Utc::now().naive_utc())?;
                persist_lock(conn, &child)?;
                Ok(child)
            })
            .await
    }

    async fn release_lock(&self, child_id: &str, actor: &str) -> Result<ChildAccount> {
        let child_id = child_id.to_string();
        let actor = actor.to_string();
        self.writer
            .exec(move |conn| {
                let mut child = load_for_update(conn, &child_id)?;
                locks::release(&mut child, &actor)?;
                persist_lock(conn, &child)?;
                Ok(child)
            })
            .await
    }
}
