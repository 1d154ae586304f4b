use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;

use ipdesk_core::applications::{
    Application, ApplicationRepositoryTrait, ApplicationSearchQuery, ApplicationSearchResponse,
    ApplicationSearchResponseMeta, ApplicationUpdate, NewApplication,
};
use ipdesk_core::locks;
use ipdesk_core::signatures::SignatureState;
use ipdesk_core::Result;

use super::model::ApplicationDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::applications;

/// Repository for managing application data in the database.
///
/// All mutations run on the writer actor; the jobs that involve the lock
/// guard load the row, run the guard, and persist the result inside one
/// immediate transaction, so the holder check can never race another write.
pub struct ApplicationRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl ApplicationRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

/// Loads a row for update inside a writer job.
fn load_for_update(conn: &mut SqliteConnection, application_id: &str) -> Result<Application> {
    let row = applications::table
        .find(application_id)
        .select(ApplicationDB::as_select())
        .first::<ApplicationDB>(conn)
        .map_err(StorageError::from)?;
    Ok(row.into())
}

/// Writes the lock fields of `application` back to its row.
fn persist_lock(conn: &mut SqliteConnection, application: &Application) -> Result<()> {
    diesel::update(applications::table.find(&application.id))
        .set((
            applications::locked_by.eq(application.lock.locked_by.clone()),
            applications::locked_date.eq(application.lock.locked_date),
        ))
        .execute(conn)
        .map_err(StorageError::from)?;
    Ok(())
}

#[async_trait]
impl ApplicationRepositoryTrait for ApplicationRepository {
    fn get_by_id(&self, application_id: &str) -> Result<Application> {
        let mut conn = get_connection(&self.pool)?;
        let row = applications::table
            .find(application_id)
            .select(ApplicationDB::as_select())
            .first::<ApplicationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(row.into())
    }

    fn list_by_number(&self, number: &str) -> Result<Vec<Application>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = applications::table
            .filter(applications::number.eq(number))
            .order(applications::created_at.asc())
            .select(ApplicationDB::as_select())
            .load::<ApplicationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Application::from).collect())
    }

    fn find_by_envelope_id(&self, envelope_id: &str) -> Result<Application> {
        let mut conn = get_connection(&self.pool)?;
        let row = applications::table
            .filter(applications::signature_envelope_id.eq(envelope_id))
            .select(ApplicationDB::as_select())
            .first::<ApplicationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(row.into())
    }

    fn search(&self, query: ApplicationSearchQuery) -> Result<ApplicationSearchResponse> {
        let mut conn = get_connection(&self.pool)?;

        let page = query.page.max(0);
        let page_size = query.page_size.clamp(1, 500);
        let offset = page * page_size;

        let build_base_query = || {
            let mut q = applications::table.into_boxed();
            if let Some(ref account_ids) = query.account_ids {
                q = q.filter(applications::account_id.eq_any(account_ids));
            }
            if let Some(ip_right_type) = query.ip_right_type {
                q = q.filter(applications::ip_right_type.eq(ip_right_type.as_str()));
            }
            if let Some(ref statuses) = query.statuses {
                q = q.filter(applications::status.eq_any(statuses));
            }
            if let Some(ref keyword) = query.keyword {
                let pattern = format!("%{}%", keyword);
                q = q.filter(
                    applications::number
                        .like(pattern.clone())
                        .or(applications::title.like(pattern.clone()))
                        .or(applications::applicant_name.like(pattern)),
                );
            }
            if let Some(date_from) = query.date_from {
                q = q.filter(applications::created_at.ge(date_from));
            }
            if let Some(date_to) = query.date_to {
                q = q.filter(applications::created_at.le(date_to));
            }
            q
        };

        let total_row_count = build_base_query()
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;

        let mut page_query = build_base_query();
        page_query = match query.sort {
            Some(ref sort) => match (sort.id.as_str(), sort.desc) {
                ("number", false) => page_query.order(applications::number.asc()),
                ("number", true) => page_query.order(applications::number.desc()),
                ("status", false) => page_query.order(applications::status.asc()),
                ("status", true) => page_query.order(applications::status.desc()),
                ("title", false) => page_query.order(applications::title.asc()),
                ("title", true) => page_query.order(applications::title.desc()),
                ("date", false) => page_query.order(applications::created_at.asc()),
                (_, _) => page_query.order(applications::created_at.desc()),
            },
            None => page_query.order(applications::created_at.desc()),
        };

        let rows = page_query
            .select(ApplicationDB::as_select())
            .limit(page_size)
            .offset(offset)
            .load::<ApplicationDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(ApplicationSearchResponse {
            data: rows.into_iter().map(Application::from).collect(),
            meta: ApplicationSearchResponseMeta { total_row_count },
        })
    }

    async fn create(&self, new_application: NewApplication, status: &str) -> Result<Application> {
        let status = status.to_string();
        self.writer
            .exec(move |conn| {
                let row = ApplicationDB::from_new(new_application, &status);
                diesel::insert_into(applications::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(row.into())
            })
            .await
    }

    async fn update_draft(&self, update: ApplicationUpdate, actor: &str) -> Result<Application> {
        let actor = actor.to_string();
        self.writer
            .exec(move |conn| {
                let application_id = update.id.clone().unwrap_or_default();
                let mut application = load_for_update(conn, &application_id)?;
                // Same precondition as acquire; clears the lock so the save
                // releases it in the same transaction.
                locks::release(&mut application, &actor)?;

                application.title = update.title;
                application.applicant_name = update.applicant_name;
                application.payload = update.payload;
                application.updated_at = Utc::now().naive_utc();

                diesel::update(applications::table.find(&application.id))
                    .set((
                        applications::title.eq(application.title.clone()),
                        applications::applicant_name.eq(application.applicant_name.clone()),
                        applications::payload.eq(application.payload.clone()),
                        applications::locked_by.eq(None::<String>),
                        applications::locked_date.eq(None::<NaiveDateTime>),
                        applications::updated_at.eq(application.updated_at),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(application)
            })
            .await
    }

    async fn delete_draft(&self, application_id: &str, actor: &str) -> Result<()> {
        let application_id = application_id.to_string();
        let actor = actor.to_string();
        self.writer
            .exec(move |conn| {
                let mut application = load_for_update(conn, &application_id)?;
                locks::release(&mut application, &actor)?;

                diesel::delete(applications::table.find(&application_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn set_status(
        &self,
        application_id: &str,
        status: &str,
        actor: &str,
    ) -> Result<Application> {
        let application_id = application_id.to_string();
        let status = status.to_string();
        let actor = actor.to_string();
        self.writer
            .exec(move |conn| {
                let mut application = load_for_update(conn, &application_id)?;
                locks::release(&mut application, &actor)?;

                application.status = status.clone();
                application.updated_at = Utc::now().naive_utc();

                diesel::update(applications::table.find(&application.id))
                    .set((
                        applications::status.eq(status),
                        applications::locked_by.eq(None::<String>),
                        applications::locked_date.eq(None::<NaiveDateTime>),
                        applications::updated_at.eq(application.updated_at),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(application)
            })
            .await
    }

    async fn set_signature_state(
        &self,
        application_id: &str,
        signature: SignatureState,
    ) -> Result<Application> {
        let application_id = application_id.to_string();
        self.writer
            .exec(move |conn| {
                let mut application = load_for_update(conn, &application_id)?;

                application.signature = signature.clone();
                application.updated_at = Utc::now().naive_utc();

                diesel::update(applications::table.find(&application.id))
                    .set((
                        applications::signature_status.eq(signature.status.as_str().to_string()),
                        applications::signature_envelope_id.eq(signature.envelope_id),
                        applications::signature_signed_at.eq(signature.signed_at),
                        applications::signature_signer.eq(signature.signer),
                        applications::updated_at.eq(application.updated_at),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(application)
            })
            .await
    }

    async fn acquire_lock(&self, application_id: &str, actor: &str) -> Result<Application> {
        let application_id = application_id.to_string();
        let actor = actor.to_string();
        self.writer
            .exec(move |conn| {
                let mut application = load_for_update(conn, &application_id)?;
                locks::try_acquire(&mut application, &actor, Utc::now().naive_utc())?;
                persist_lock(conn, &application)?;
                Ok(application)
            })
            .await
    }

    async fn release_lock(&self, application_id: &str, actor: &str) -> Result<Application> {
        let application_id = application_id.to_string();
        let actor = actor.to_string();
        self.writer
            .exec(move |conn| {
                let mut application = load_for_update(conn, &application_id)?;
                locks::release(&mut application, &actor)?;
                persist_lock(conn, &application)?;
                Ok(application)
            })
            .await
    }

    async fn acquire_lock_by_number(
        &self,
        number: &str,
        actor: &str,
    ) -> Result<Vec<Application>> {
        let number = number.to_string();
        let actor = actor.to_string();
        self.writer
            .exec(move |conn| {
                let rows = applications::table
                    .filter(applications::number.eq(&number))
                    .order(applications::created_at.asc())
                    .select(ApplicationDB::as_select())
                    .load::<ApplicationDB>(conn)
                    .map_err(StorageError::from)?;

                let now = Utc::now().naive_utc();
                let mut locked = Vec::with_capacity(rows.len());
                for row in rows {
                    let mut application: Application = row.into();
                    // A conflicting row aborts the job; the transaction
                    // rollback un-does the rows already locked.
                    locks::try_acquire(&mut application, &actor, now)?;
                    persist_lock(conn, &application)?;
                    locked.push(application);
                }
                Ok(locked)
            })
            .await
    }

    async fn release_lock_by_number(
        &self,
        number: &str,
        actor: &str,
    ) -> Result<Vec<Application>> {
        let number = number.to_string();
        let actor = actor.to_string();
        self.writer
            .exec(move |conn| {
                let rows = applications::table
                    .filter(applications::number.eq(&number))
                    .order(applications::created_at.asc())
                    .select(ApplicationDB::as_select())
                    .load::<ApplicationDB>(conn)
                    .map_err(StorageError::from)?;

                let mut released = Vec::with_capacity(rows.len());
                for row in rows {
                    let mut application: Application = row.into();
                    locks::release(&mut application, &actor)?;
                    persist_lock(conn, &application)?;
                    released.push(application);
                }
                Ok(released)
            })
            .await
    }
}
