//! Reconciliation module - twelve-period comparison worksheets.

mod reconciliation_engine;
mod reconciliation_model;
mod reconciliation_service;
mod reconciliation_traits;


pub use reconciliation_engine::{merge_import, period_matches, set_cell, totals};
pub use reconciliation_model::{
    blank_rows, CellValue, ImportOutcome, ImportedPeriodRow, NewReconciliationRecord,
    PeriodMatchPolicy, ReconciliationFilter, ReconciliationRecord, ReconciliationRow,
    ReconciliationTotals, ReconciliationType,
};
pub use reconciliation_service::ReconciliationService;
pub use reconciliation_traits::{ReconciliationRepositoryTrait, ReconciliationServiceTrait};
