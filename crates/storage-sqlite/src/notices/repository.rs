use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::{debug, warn};
use std::sync::Arc;
use uuid::Uuid;

use super::model::{normalize_gstin, NoticeDB, NoticeMetadataDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::defects::DefectDB;
use crate::errors::StorageError;
use crate::schema::{defects, notices};
use crate::utils::decimal_to_db;
use taxcase_core::errors::{DatabaseError, Result, ValidationError};
use taxcase_core::notices::{
    NewNotice, Notice, NoticeFilter, NoticeLedgerChange, NoticeRepositoryTrait, NoticeStatus,
    NoticeUpdate,
};
use taxcase_core::Error;

pub struct NoticeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl NoticeRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        NoticeRepository { pool, writer }
    }
}

/// Applies one change set. Must run inside the writer's transaction.
fn apply_change(conn: &mut SqliteConnection, change: NoticeLedgerChange) -> Result<()> {
    let now = Utc::now().naive_utc();

    let updated = diesel::update(
        notices::table
            .filter(notices::id.eq(&change.notice_id))
            .filter(notices::version.eq(change.expected_version)),
    )
    .set((
        notices::demand_amount.eq(decimal_to_db(change.demand_amount)),
        notices::version.eq(change.expected_version + 1),
        notices::updated_at.eq(now),
    ))
    .execute(conn)
    .map_err(StorageError::from)?;

    if updated == 0 {
        let current: Option<i64> = notices::table
            .find(&change.notice_id)
            .select(notices::version)
            .first(conn)
            .optional()
            .map_err(StorageError::from)?;
        return Err(match current {
            None => Error::Database(DatabaseError::NotFound(format!(
                "Notice {} not found",
                change.notice_id
            ))),
            Some(version) => {
                warn!(
                    "Notice {} changed underneath a ledger write (expected version {}, found {})",
                    change.notice_id, change.expected_version, version
                );
                Error::ConcurrentModification(format!(
                    "Notice {} is at version {}, expected {}",
                    change.notice_id, version, change.expected_version
                ))
            }
        });
    }

    if !change.deleted_defect_ids.is_empty() {
        diesel::delete(
            defects::table
                .filter(defects::notice_id.eq(&change.notice_id))
                .filter(defects::id.eq_any(&change.deleted_defect_ids)),
        )
        .execute(conn)
        .map_err(StorageError::from)?;
    }

    for defect in &change.upserted_defects {
        if defect.notice_id != change.notice_id {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Defect {} belongs to notice {}, not {}",
                defect.id, defect.notice_id, change.notice_id
            ))));
        }
        let defect_db = DefectDB::from(defect);
        diesel::insert_into(defects::table)
            .values(&defect_db)
            .on_conflict(defects::id)
            .do_update()
            .set(&defect_db)
            .execute(conn)
            .map_err(StorageError::from)?;
    }

    Ok(())
}

#[async_trait]
impl NoticeRepositoryTrait for NoticeRepository {
    async fn create(&self, new_notice: NewNotice) -> Result<Notice> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Notice> {
                let id = new_notice
                    .id
                    .clone()
                    .filter(|id| !id.trim().is_empty())
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let notice_db = NoticeDB::from_new(new_notice, id, Utc::now().naive_utc());

                let result_db = diesel::insert_into(notices::table)
                    .values(&notice_db)
                    .returning(NoticeDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Notice::from(result_db))
            })
            .await
    }

    async fn update(&self, notice_update: NoticeUpdate) -> Result<Notice> {
        let notice_id = notice_update.id.clone();
        let changes = NoticeMetadataDB::from_update(notice_update, Utc::now().naive_utc());

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Notice> {
                let updated = diesel::update(notices::table.find(&notice_id))
                    .set((&changes, notices::version.eq(notices::version + 1)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if updated == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "Notice {} not found",
                        notice_id
                    ))));
                }
                let result_db = notices::table
                    .find(&notice_id)
                    .select(NoticeDB::as_select())
                    .first::<NoticeDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Notice::from(result_db))
            })
            .await
    }

    async fn delete(&self, notice_id: &str) -> Result<usize> {
        let notice_id = notice_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                // Defects and payments cascade with the notice.
                Ok(diesel::delete(notices::table.find(notice_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_by_id(&self, notice_id: &str) -> Result<Notice> {
        let mut conn = get_connection(&self.pool)?;
        let notice_db = notices::table
            .find(notice_id)
            .select(NoticeDB::as_select())
            .first::<NoticeDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Notice::from(notice_db))
    }

    fn list(&self, filter: &NoticeFilter) -> Result<Vec<Notice>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = notices::table.select(NoticeDB::as_select()).into_boxed();

        if filter.exclude_closed {
            query = query.filter(notices::status.ne(NoticeStatus::Closed.as_str()));
        }
        if let Some(statuses) = &filter.statuses {
            let codes: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();
            query = query.filter(notices::status.eq_any(codes));
        }
        if let Some(limit) = filter.due_before {
            query = query.filter(notices::due_date.lt(limit));
        }
        if let Some(gstin) = &filter.gstin {
            query = query.filter(notices::gstin.eq(normalize_gstin(gstin)));
        }
        if let Some(arn) = &filter.arn {
            query = query.filter(notices::arn.eq(arn.clone()));
        }

        let notices_db = query
            .order((notices::due_date.asc(), notices::created_at.asc()))
            .load::<NoticeDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(notices_db.into_iter().map(Notice::from).collect())
    }

    async fn apply_ledger_changes(&self, changes: Vec<NoticeLedgerChange>) -> Result<usize> {
        if changes.is_empty() {
            return Ok(0);
        }
        debug!("Applying {} ledger change sets", changes.len());

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let count = changes.len();
                for change in changes {
                    apply_change(conn, change)?;
                }
                Ok(count)
            })
            .await
    }
}
