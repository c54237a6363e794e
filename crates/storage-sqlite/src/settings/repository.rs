use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::AppSettingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::app_settings::dsl::*;
use taxcase_core::errors::Result;
use taxcase_core::settings::{Settings, SettingsRepositoryTrait, SettingsUpdate};

pub struct SettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SettingsRepository { pool, writer }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_settings(&self) -> Result<Settings> {
        let mut conn = get_connection(&self.pool)?;
        let all_settings: Vec<(String, String)> = app_settings
            .select((setting_key, setting_value))
            .load::<(String, String)>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(Settings::from_pairs(all_settings))
    }

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()> {
        let rows: Vec<AppSettingDB> = new_settings
            .to_pairs()
            .into_iter()
            .map(|(key, value)| AppSettingDB {
                setting_key: key.to_string(),
                setting_value: value,
            })
            .collect();

        self.writer
            .exec(move |conn| {
                for row in &rows {
                    diesel::replace_into(app_settings)
                        .values(row)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(())
            })
            .await
    }
}
