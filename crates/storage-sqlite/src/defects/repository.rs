use diesel::prelude::*;
use std::sync::Arc;

use super::model::DefectDB;
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::defects;
use crate::utils::chunk_for_sqlite;
use taxcase_core::defects::{Defect, DefectRepositoryTrait};
use taxcase_core::errors::Result;

/// Read side of defect storage. Writes go through the notice repository's
/// ledger path so demand is committed with them.
pub struct DefectRepository {
    pool: Arc<DbPool>,
}

impl DefectRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        DefectRepository { pool }
    }
}

impl DefectRepositoryTrait for DefectRepository {
    fn get_by_id(&self, defect_id: &str) -> Result<Defect> {
        let mut conn = get_connection(&self.pool)?;
        let defect_db = defects::table
            .find(defect_id)
            .select(DefectDB::as_select())
            .first::<DefectDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Defect::from(defect_db))
    }

    fn list_by_notice(&self, notice_id: &str) -> Result<Vec<Defect>> {
        let mut conn = get_connection(&self.pool)?;
        let defects_db = defects::table
            .filter(defects::notice_id.eq(notice_id))
            .order((defects::created_at.asc(), defects::id.asc()))
            .select(DefectDB::as_select())
            .load::<DefectDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(defects_db.into_iter().map(Defect::from).collect())
    }

    fn list_by_notices(&self, notice_ids: &[String]) -> Result<Vec<Defect>> {
        let mut conn = get_connection(&self.pool)?;
        let mut result = Vec::new();
        for chunk in chunk_for_sqlite(notice_ids) {
            let defects_db = defects::table
                .filter(defects::notice_id.eq_any(chunk))
                .order((defects::created_at.asc(), defects::id.asc()))
                .select(DefectDB::as_select())
                .load::<DefectDB>(&mut conn)
                .map_err(StorageError::from)?;
            result.extend(defects_db.into_iter().map(Defect::from));
        }
        Ok(result)
    }
}
