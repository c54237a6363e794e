//! Bulk interest recompute models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Parameters of a bulk recompute run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRecomputeRequest {
    pub target_date: NaiveDate,
    pub annual_rate_percent: Decimal,
    /// Recorded on the audit entry; falls back to the configured default actor
    pub actor: Option<String>,
}

/// Outcome of a committed bulk recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRecomputeResult {
    /// Notices whose demand was rewritten
    pub updated_count: usize,
    pub defects_updated: usize,
    pub target_date: NaiveDate,
    pub annual_rate_percent: Decimal,
}

/// What a bulk recompute would change, without writing anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRecomputePreview {
    pub notices_affected: usize,
    pub defects_affected: usize,
    /// Net change in interest across the repriced defects. Drift between a
    /// notice's stored demand and its defects is not counted.
    pub interest_delta: Decimal,
}
