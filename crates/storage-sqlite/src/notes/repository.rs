use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;

use ipdesk_core::locks;
use ipdesk_core::notes::{ApplicationNote, NewNote, NoteRepositoryTrait, NoteUpdate};
use ipdesk_core::Result;

use super::model::ApplicationNoteDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::application_notes;

/// Repository for managing note data in the database.
pub struct NoteRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl NoteRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_for_update(conn: &mut SqliteConnection, note_id: &str) -> Result<ApplicationNote> {
    let row = application_notes::table
        .find(note_id)
        .select(ApplicationNoteDB::as_select())
        .first::<ApplicationNoteDB>(conn)
        .map_err(StorageError::from)?;
    Ok(row.into())
}

fn persist_lock(conn: &mut SqliteConnection, note: &ApplicationNote) -> Result<()> {
    diesel::update(application_notes::table.find(&note.id))
        .set((
            application_notes::locked_by.eq(note.lock.locked_by.clone()),
            application_notes::locked_date.eq(note.lock.locked_date),
        ))
        .execute(conn)
        .map_err(StorageError::from)?;
    Ok(())
}

#[async_trait]
impl NoteRepositoryTrait for NoteRepository {
    fn get_by_id(&self, note_id: &str) -> Result<ApplicationNote> {
        let mut conn = get_connection(&self.pool)?;
        let row = application_notes::table
            .find(note_id)
            .select(ApplicationNoteDB::as_select())
            .first::<ApplicationNoteDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(row.into())
    }

    fn list_by_number(&self, application_number: &str) -> Result<Vec<ApplicationNote>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = application_notes::table
            .filter(application_notes::application_number.eq(application_number))
            .order(application_notes::created_at.asc())
            .select(ApplicationNoteDB::as_select())
            .load::<ApplicationNoteDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(ApplicationNote::from).collect())
    }

    async fn insert(&self, new_note: NewNote) -> Result<ApplicationNote> {
        self.writer
            .exec(move |conn| {
                let row: ApplicationNoteDB = new_note.into();
                diesel::insert_into(application_notes::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(row.into())
            })
            .await
    }

    async fn update(&self, update: NoteUpdate, actor: &str) -> Result<ApplicationNote> {
        let actor = actor.to_string();
        self.writer
            .exec(move |conn| {
                let note_id = update.id.clone().unwrap_or_default();
                let mut note = load_for_update(conn, &note_id)?;
                locks::release(&mut note, &actor)?;

                note.body = update.body;
                note.updated_at = Utc::now().naive_utc();

                diesel::update(application_notes::table.find(&note.id))
                    .set((
                        application_notes::body.eq(note.body.clone()),
                        application_notes::locked_by.eq(None::<String>),
                        application_notes::locked_date.eq(None::<NaiveDateTime>),
                        application_notes::updated_at.eq(note.updated_at),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(note)
            })
            .await
    }

    async fn delete(&self, note_id: &str, actor: &str) -> Result<()> {
        let note_id = note_id.to_string();
        let actor = actor.to_string();
        self.writer
            .exec(move |conn| {
                let mut note = load_for_update(conn, &note_id)?;
                locks::release(&mut note, &actor)?;

                diesel::delete(application_notes::table.find(&note_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn acquire_lock(&self, note_id: &str, actor: &str) -> Result<ApplicationNote> {
        let note_id = note_id.to_string();
        let actor = actor.to_string();
        self.writer
            .exec(move |conn| {
                let mut note = load_for_update(conn, &note_id)?;
                locks::try_acquire(&mut note, &actor, Utc::now().naive_utc())?;
                persist_lock(conn, &note)?;
                Ok(note)
            })
            .await
    }

    async fn release_lock(&self, note_id: &str, actor: &str) -> Result<ApplicationNote> {
        let note_id = note_id.to_string();
        let actor = actor.to_string();
        self.writer
            .exec(move |conn| {
                let mut note = load_for_update(conn, &note_id)?;
                locks::release(&mut note, &actor)?;
                persist_lock(conn, &note)?;
                Ok(note)
            })
            .await
    }
}
