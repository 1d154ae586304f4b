use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;

use ipdesk_core::correspondence::{CorrespondenceRepositoryTrait, Letter, NewLetter};
use ipdesk_core::Result;

use super::model::LetterDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::letters;

/// Repository for managing letter data in the database.
pub struct CorrespondenceRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl CorrespondenceRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CorrespondenceRepositoryTrait for CorrespondenceRepository {
    fn get_by_id(&self, letter_id: &str) -> Result<Letter> {
        let mut conn = get_connection(&self.pool)?;
        let row = letters::table
            .find(letter_id)
            .select(LetterDB::as_select())
            .first::<LetterDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(row.into())
    }

    fn list_by_account(&self, account_id: &str, unread_only: bool) -> Result<Vec<Letter>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = letters::table
            .filter(letters::account_id.eq(account_id))
            .into_boxed();
        if unread_only {
            query = query.filter(letters::read_at.is_null());
        }
        let rows = query
            .order(letters::received_at.desc())
            .select(LetterDB::as_select())
            .load::<LetterDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Letter::from).collect())
    }

    fn list_by_application(&self, application_number: &str) -> Result<Vec<Letter>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = letters::table
            .filter(letters::application_number.eq(application_number))
            .order(letters::received_at.desc())
            .select(LetterDB::as_select())
            .load::<LetterDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Letter::from).collect())
    }

    async fn insert(&self, new_letter: NewLetter) -> Result<Letter> {
        self.writer
            .exec(move |conn| {
                let row: LetterDB = new_letter.into();
                diesel::insert_into(letters::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(row.into())
            })
            .await
    }

    async fn mark_read(&self, letter_id: &str) -> Result<Letter> {
        let letter_id = letter_id.to_string();
        self.writer
            .exec(move |conn| {
                // First read wins; later calls leave the timestamp alone.
                diesel::update(
                    letters::table
                        .find(&letter_id)
                        .filter(letters::read_at.is_null()),
                )
                .set(letters::read_at.eq(Some(Utc::now().naive_utc())))
                .execute(conn)
                .map_err(StorageError::from)?;

                let row = letters::table
                    .find(&letter_id)
                    .select(LetterDB::as_select())
                    .first::<LetterDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(row.into())
            })
            .await
    }
}
