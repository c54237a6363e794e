use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::warn;
use std::sync::Arc;

use super::model::ReconciliationRecordDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::reconciliation_records;
use taxcase_core::errors::{DatabaseError, Result};
use taxcase_core::reconciliation::{
    ReconciliationFilter, ReconciliationRecord, ReconciliationRepositoryTrait,
};
use taxcase_core::Error;

pub struct ReconciliationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ReconciliationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ReconciliationRepository { pool, writer }
    }
}

#[async_trait]
impl ReconciliationRepositoryTrait for ReconciliationRepository {
    async fn create(&self, record: ReconciliationRecord) -> Result<ReconciliationRecord> {
        let record_db = ReconciliationRecordDB::from_domain(&record)?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::insert_into(reconciliation_records::table)
                    .values(&record_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await?;
        Ok(record)
    }

    async fn save(&self, mut record: ReconciliationRecord) -> Result<ReconciliationRecord> {
        let expected_version = record.version;
        record.version = expected_version + 1;
        let record_db = ReconciliationRecordDB::from_domain(&record)?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let updated = diesel::update(
                    reconciliation_records::table
                        .filter(reconciliation_records::id.eq(&record_db.id))
                        .filter(reconciliation_records::version.eq(expected_version)),
                )
                .set(&record_db)
                .execute(conn)
                .map_err(StorageError::from)?;
                if updated > 0 {
                    return Ok(());
                }

                let current: Option<i64> = reconciliation_records::table
                    .find(&record_db.id)
                    .select(reconciliation_records::version)
                    .first(conn)
                    .optional()
                    .map_err(StorageError::from)?;
                Err(match current {
                    None => Error::Database(DatabaseError::NotFound(format!(
                        "Reconciliation record {} not found",
                        record_db.id
                    ))),
                    Some(version) => {
                        warn!(
                            "Worksheet {} was saved by another writer (expected version {}, found {})",
                            record_db.id, expected_version, version
                        );
                        Error::ConcurrentModification(format!(
                            "Reconciliation record {} is at version {}, expected {}",
                            record_db.id, version, expected_version
                        ))
                    }
                })
            })
            .await?;
        Ok(record)
    }

    async fn delete(&self, record_id: &str) -> Result<usize> {
        let record_id = record_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(
                    diesel::delete(reconciliation_records::table.find(record_id))
                        .execute(conn)
                        .map_err(StorageError::from)?,
                )
            })
            .await
    }

    fn get_by_id(&self, record_id: &str) -> Result<ReconciliationRecord> {
        let mut conn = get_connection(&self.pool)?;
        reconciliation_records::table
            .find(record_id)
            .select(ReconciliationRecordDB::as_select())
            .first::<ReconciliationRecordDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_domain()
    }

    fn list(&self, filter: &ReconciliationFilter) -> Result<Vec<ReconciliationRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = reconciliation_records::table
            .select(ReconciliationRecordDB::as_select())
            .into_boxed();

        if let Some(gstin) = &filter.gstin {
            query = query.filter(reconciliation_records::gstin.eq(gstin.clone()));
        }
        if let Some(year) = &filter.financial_year {
            query = query.filter(reconciliation_records::financial_year.eq(year.clone()));
        }
        if let Some(notice_id) = &filter.notice_id {
            query = query.filter(reconciliation_records::notice_id.eq(notice_id.clone()));
        }

        query
            .order(reconciliation_records::created_at.desc())
            .load::<ReconciliationRecordDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(ReconciliationRecordDB::into_domain)
            .collect()
    }
}
