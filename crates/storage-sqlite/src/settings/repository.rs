use async_trait::async_trait;
use diesel::prelude::*;

use ipdesk_core::settings::SettingsRepositoryTrait;
use ipdesk_core::Result;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::app_settings;

/// Row in the key-value settings table.
#[derive(Queryable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::app_settings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct SettingRow {
    setting_key: String,
    setting_value: String,
}

/// Repository for the key-value settings store.
pub struct SettingsRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_setting(&self, setting_key: &str) -> Result<String> {
        let mut conn = get_connection(&self.pool)?;
        let row = app_settings::table
            .find(setting_key)
            .select(SettingRow::as_select())
            .first::<SettingRow>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(row.setting_value)
    }

    async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()> {
        let row = SettingRow {
            setting_key: setting_key.to_string(),
            setting_value: setting_value.to_string(),
        };
        self.writer
            .exec(move |conn| {
                diesel::replace_into(app_settings::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
