use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use super::model::AuditEntryDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::audit_log;
use taxcase_core::audit::{AuditEntry, AuditLogRepositoryTrait, NewAuditEntry};
use taxcase_core::errors::Result;

pub struct AuditLogRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AuditLogRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        AuditLogRepository { pool, writer }
    }
}

#[async_trait]
impl AuditLogRepositoryTrait for AuditLogRepository {
    async fn record(&self, entry: NewAuditEntry) -> Result<AuditEntry> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<AuditEntry> {
                let entry_db = AuditEntryDB::from_new(entry, Uuid::new_v4().to_string());
                diesel::insert_into(audit_log::table)
                    .values(&entry_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(AuditEntry::from(entry_db))
            })
            .await
    }

    fn list_for_entity(&self, entity_type: &str, entity_id: &str) -> Result<Vec<AuditEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let entries_db = audit_log::table
            .filter(audit_log::entity_type.eq(entity_type))
            .filter(audit_log::entity_id.eq(entity_id))
            .order((audit_log::recorded_at.desc(), audit_log::id.desc()))
            .select(AuditEntryDB::as_select())
            .load::<AuditEntryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(entries_db.into_iter().map(AuditEntry::from).collect())
    }
}
