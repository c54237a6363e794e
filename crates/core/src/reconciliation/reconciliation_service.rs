use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

use super::reconciliation_engine::{merge_import, set_cell, totals};
use super::reconciliation_model::{
    blank_rows, CellValue, ImportOutcome, ImportedPeriodRow, NewReconciliationRecord,
    PeriodMatchPolicy, ReconciliationFilter, ReconciliationRecord, ReconciliationTotals,
};
use super::reconciliation_traits::{ReconciliationRepositoryTrait, ReconciliationServiceTrait};
use crate::errors::Result;
use crate::settings::SettingsServiceTrait;

/// Service for reconciliation worksheets
pub struct ReconciliationService {
    repository: Arc<dyn ReconciliationRepositoryTrait>,
    settings_service: Arc<dyn SettingsServiceTrait>,
}

impl ReconciliationService {
    pub fn new(
        repository: Arc<dyn ReconciliationRepositoryTrait>,
        settings_service: Arc<dyn SettingsServiceTrait>,
    ) -> Self {
        Self {
            repository,
            settings_service,
        }
    }
}

#[async_trait::async_trait]
impl ReconciliationServiceTrait for ReconciliationService {
    async fn create_record(
        &self,
        new_record: NewReconciliationRecord,
    ) -> Result<ReconciliationRecord> {
        new_record.validate()?;
        let now = Utc::now().naive_utc();
        let record = ReconciliationRecord::from_parts(
            Uuid::new_v4().to_string(),
            new_record.record_type,
            new_record.gstin.trim().to_string(),
            new_record.financial_year.trim().to_string(),
            new_record.notice_id,
            new_record.title,
            blank_rows(),
            now,
            now,
        )?;
        self.repository.create(record).await
    }

    async fn update_cell(
        &self,
        record_id: &str,
        row_index: usize,
        value: CellValue,
    ) -> Result<ReconciliationRecord> {
        let mut record = self.repository.get_by_id(record_id)?;
        set_cell(&mut record, row_index, value)?;
        record.updated_at = Utc::now().naive_utc();
        self.repository.save(record).await
    }

    async fn import_rows(
        &self,
        record_id: &str,
        rows: Vec<ImportedPeriodRow>,
        policy: Option<PeriodMatchPolicy>,
    ) -> Result<(ReconciliationRecord, ImportOutcome)> {
        let policy = match policy {
            Some(policy) => policy,
            None => self.settings_service.get_settings()?.period_match_policy,
        };
        debug!(
            "Importing {} rows into worksheet {} ({:?})",
            rows.len(),
            record_id,
            policy
        );

        let mut record = self.repository.get_by_id(record_id)?;
        let outcome = merge_import(&mut record, &rows, policy);
        record.updated_at = Utc::now().naive_utc();
        let saved = self.repository.save(record).await?;

        info!(
            "Worksheet {} import: {} periods updated, {} rows skipped",
            record_id,
            outcome.matched_periods.len(),
            outcome.unmatched_rows.len()
        );
        Ok((saved, outcome))
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        self.repository.delete(record_id).await?;
        Ok(())
    }

    fn get_record(&self, record_id: &str) -> Result<ReconciliationRecord> {
        self.repository.get_by_id(record_id)
    }

    fn list_records(&self, filter: &ReconciliationFilter) -> Result<Vec<ReconciliationRecord>> {
        self.repository.list(filter)
    }

    fn get_totals(&self, record_id: &str) -> Result<ReconciliationTotals> {
        Ok(totals(&self.repository.get_by_id(record_id)?))
    }
}
