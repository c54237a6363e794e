//! Reconciliation worksheet models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{FINANCIAL_YEAR_PERIODS, RECONCILIATION_PERIOD_COUNT};
use crate::errors::ValidationError;
use crate::{Error, Result};

/// Which pair of reported figures a worksheet compares.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReconciliationType {
    /// Outward supplies in books against the outward supply return
    OutwardSupplyVsReturn,
    /// Input credit claimed against the auto-drafted credit statement
    InputCreditVsStatement,
    /// Books of account against the summary return
    BooksVsReturn,
    Custom(String),
}

impl ReconciliationType {
    pub fn as_str(&self) -> &str {
        match self {
            ReconciliationType::OutwardSupplyVsReturn => "OUTWARD_SUPPLY_VS_RETURN",
            ReconciliationType::InputCreditVsStatement => "INPUT_CREDIT_VS_STATEMENT",
            ReconciliationType::BooksVsReturn => "BOOKS_VS_RETURN",
            ReconciliationType::Custom(value) => value.as_str(),
        }
    }
}

impl From<String> for ReconciliationType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "OUTWARD_SUPPLY_VS_RETURN" => ReconciliationType::OutwardSupplyVsReturn,
            "INPUT_CREDIT_VS_STATEMENT" => ReconciliationType::InputCreditVsStatement,
            "BOOKS_VS_RETURN" => ReconciliationType::BooksVsReturn,
            _ => ReconciliationType::Custom(value),
        }
    }
}

impl From<&str> for ReconciliationType {
    fn from(value: &str) -> Self {
        ReconciliationType::from(value.to_string())
    }
}

impl From<ReconciliationType> for String {
    fn from(value: ReconciliationType) -> Self {
        value.as_str().to_string()
    }
}

/// How imported period labels are matched to worksheet periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodMatchPolicy {
    /// Month name or abbreviation, optionally followed by a year
    #[default]
    Exact,
    /// Case-insensitive substring match on the month name
    Contains,
}

impl PeriodMatchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodMatchPolicy::Exact => "EXACT",
            PeriodMatchPolicy::Contains => "CONTAINS",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "EXACT" => Some(PeriodMatchPolicy::Exact),
            "CONTAINS" => Some(PeriodMatchPolicy::Contains),
            _ => None,
        }
    }
}

/// One period of a worksheet. `diff` always equals `source_a - source_b`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RowData")]
pub struct ReconciliationRow {
    period: String,
    source_a: Decimal,
    source_b: Decimal,
    diff: Decimal,
    remarks: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RowData {
    period: String,
    #[serde(default)]
    source_a: Decimal,
    #[serde(default)]
    source_b: Decimal,
    #[serde(default)]
    remarks: String,
}

impl From<RowData> for ReconciliationRow {
    fn from(data: RowData) -> Self {
        ReconciliationRow::new(data.period, data.source_a, data.source_b, data.remarks)
    }
}

impl ReconciliationRow {
    pub fn new(
        period: impl Into<String>,
        source_a: Decimal,
        source_b: Decimal,
        remarks: impl Into<String>,
    ) -> Self {
        Self {
            period: period.into(),
            source_a,
            source_b,
            diff: source_a - source_b,
            remarks: remarks.into(),
        }
    }

    /// A zero-valued row for `period`.
    pub fn blank(period: impl Into<String>) -> Self {
        Self::new(period, Decimal::ZERO, Decimal::ZERO, String::new())
    }

    pub fn period(&self) -> &str {
        &self.period
    }

    pub fn source_a(&self) -> Decimal {
        self.source_a
    }

    pub fn source_b(&self) -> Decimal {
        self.source_b
    }

    pub fn diff(&self) -> Decimal {
        self.diff
    }

    pub fn remarks(&self) -> &str {
        &self.remarks
    }

    pub(crate) fn set_source_a(&mut self, value: Decimal) {
        self.source_a = value;
        self.diff = self.source_a - self.source_b;
    }

    pub(crate) fn set_source_b(&mut self, value: Decimal) {
        self.source_b = value;
        self.diff = self.source_a - self.source_b;
    }

    pub(crate) fn set_remarks(&mut self, value: String) {
        self.remarks = value;
    }
}

/// A twelve-period comparison worksheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationRecord {
    pub id: String,
    pub record_type: ReconciliationType,
    pub gstin: String,
    /// Financial year label, e.g. `2023-24`
    pub financial_year: String,
    pub notice_id: Option<String>,
    pub title: Option<String>,
    rows: Vec<ReconciliationRow>,
    /// Bumped on every save; a save from a stale read is rejected
    pub version: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ReconciliationRecord {
    /// Assembles a record, rejecting row lists that are not exactly twelve long.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: String,
        record_type: ReconciliationType,
        gstin: String,
        financial_year: String,
        notice_id: Option<String>,
        title: Option<String>,
        rows: Vec<ReconciliationRow>,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Result<Self> {
        if rows.len() != RECONCILIATION_PERIOD_COUNT {
            return Err(Error::Reconciliation(format!(
                "Worksheet {} has {} rows, expected {}",
                id,
                rows.len(),
                RECONCILIATION_PERIOD_COUNT
            )));
        }
        Ok(Self {
            id,
            record_type,
            gstin,
            financial_year,
            notice_id,
            title,
            rows,
            version: 0,
            created_at,
            updated_at,
        })
    }

    pub fn rows(&self) -> &[ReconciliationRow] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [ReconciliationRow] {
        &mut self.rows
    }
}

/// Twelve zero-valued rows in financial-year order.
pub fn blank_rows() -> Vec<ReconciliationRow> {
    FINANCIAL_YEAR_PERIODS
        .iter()
        .map(|period| ReconciliationRow::blank(*period))
        .collect()
}

/// Input model for creating a worksheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReconciliationRecord {
    pub record_type: ReconciliationType,
    pub gstin: String,
    pub financial_year: String,
    pub notice_id: Option<String>,
    pub title: Option<String>,
}

impl NewReconciliationRecord {
    pub fn validate(&self) -> Result<()> {
        if self.gstin.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "gstin".to_string(),
            )));
        }
        if self.financial_year.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "financialYear".to_string(),
            )));
        }
        Ok(())
    }
}

/// A single cell write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum CellValue {
    SourceA(Decimal),
    SourceB(Decimal),
    Remarks(String),
}

/// One row as supplied by a spreadsheet import collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedPeriodRow {
    pub period: String,
    pub source_a: Option<Decimal>,
    pub source_b: Option<Decimal>,
    pub remarks: Option<String>,
}

/// What an import merge changed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    /// Worksheet periods overwritten by an imported row
    pub matched_periods: Vec<String>,
    /// Imported period labels that matched no worksheet period
    pub unmatched_rows: Vec<String>,
}

/// Column sums over all twelve rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationTotals {
    pub sum_a: Decimal,
    pub sum_b: Decimal,
    pub sum_diff: Decimal,
}

/// Query filter for listing worksheets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationFilter {
    pub gstin: Option<String>,
    pub financial_year: Option<String>,
    pub notice_id: Option<String>,
}
