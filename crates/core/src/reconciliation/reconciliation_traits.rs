//! Reconciliation repository and service traits.

use async_trait::async_trait;

use super::reconciliation_model::{
    CellValue, ImportOutcome, ImportedPeriodRow, NewReconciliationRecord, PeriodMatchPolicy,
    ReconciliationFilter, ReconciliationRecord, ReconciliationTotals,
};
use crate::errors::Result;

/// Worksheets are stored whole; rows have no identity of their own.
#[async_trait]
pub trait ReconciliationRepositoryTrait: Send + Sync {
    async fn create(&self, record: ReconciliationRecord) -> Result<ReconciliationRecord>;

    /// Replaces the stored worksheet with `record` and returns it with the
    /// bumped version. Fails with `ConcurrentModification` when the stored
    /// version no longer matches `record.version`.
    async fn save(&self, record: ReconciliationRecord) -> Result<ReconciliationRecord>;

    async fn delete(&self, record_id: &str) -> Result<usize>;

    fn get_by_id(&self, record_id: &str) -> Result<ReconciliationRecord>;

    fn list(&self, filter: &ReconciliationFilter) -> Result<Vec<ReconciliationRecord>>;
}

#[async_trait]
pub trait ReconciliationServiceTrait: Send + Sync {
    /// Creates a worksheet with twelve zero-valued rows.
    async fn create_record(
        &self,
        new_record: NewReconciliationRecord,
    ) -> Result<ReconciliationRecord>;

    async fn update_cell(
        &self,
        record_id: &str,
        row_index: usize,
        value: CellValue,
    ) -> Result<ReconciliationRecord>;

    /// Merges imported rows. `policy` falls back to the configured default.
    async fn import_rows(
        &self,
        record_id: &str,
        rows: Vec<ImportedPeriodRow>,
        policy: Option<PeriodMatchPolicy>,
    ) -> Result<(ReconciliationRecord, ImportOutcome)>;

    async fn delete_record(&self, record_id: &str) -> Result<()>;

    fn get_record(&self, record_id: &str) -> Result<ReconciliationRecord>;

    fn list_records(&self, filter: &ReconciliationFilter) -> Result<Vec<ReconciliationRecord>>;

    fn get_totals(&self, record_id: &str) -> Result<ReconciliationTotals>;
}
