//! Database models for reconciliation worksheets.
//!
//! The twelve rows are stored together as JSON. Amounts are kept as decimal
//! strings and `diff` is not stored; it is re-derived when rows are loaded.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::utils::{decimal_to_db, parse_decimal_tolerant};
use taxcase_core::reconciliation::{ReconciliationRecord, ReconciliationRow, ReconciliationType};

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::reconciliation_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct ReconciliationRecordDB {
    pub id: String,
    pub record_type: String,
    pub gstin: String,
    pub financial_year: String,
    pub notice_id: Option<String>,
    pub title: Option<String>,
    pub rows_json: String,
    pub version: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Stored shape of one worksheet row.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
struct StoredRow {
    period: String,
    source_a: String,
    source_b: String,
    #[serde(default)]
    remarks: String,
}

impl ReconciliationRecordDB {
    pub fn from_domain(record: &ReconciliationRecord) -> Result<Self, StorageError> {
        let rows: Vec<StoredRow> = record
            .rows()
            .iter()
            .map(|row| StoredRow {
                period: row.period().to_string(),
                source_a: decimal_to_db(row.source_a()),
                source_b: decimal_to_db(row.source_b()),
                remarks: row.remarks().to_string(),
            })
            .collect();

        Ok(Self {
            id: record.id.clone(),
            record_type: record.record_type.as_str().to_string(),
            gstin: record.gstin.clone(),
            financial_year: record.financial_year.clone(),
            notice_id: record.notice_id.clone(),
            title: record.title.clone(),
            rows_json: serde_json::to_string(&rows)?,
            version: record.version,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    pub fn into_domain(self) -> taxcase_core::Result<ReconciliationRecord> {
        let stored: Vec<StoredRow> =
            serde_json::from_str(&self.rows_json).map_err(StorageError::from)?;
        let rows = stored
            .into_iter()
            .map(|row| {
                ReconciliationRow::new(
                    row.period,
                    parse_decimal_tolerant(&row.source_a, "source_a"),
                    parse_decimal_tolerant(&row.source_b, "source_b"),
                    row.remarks,
                )
            })
            .collect();

        let mut record = ReconciliationRecord::from_parts(
            self.id,
            ReconciliationType::from(self.record_type),
            self.gstin,
            self.financial_year,
            self.notice_id,
            self.title,
            rows,
            self.created_at,
            self.updated_at,
        )?;
        record.version = self.version;
        Ok(record)
    }
}
