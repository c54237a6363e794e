//! Notice domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::GSTIN_LENGTH;
use crate::defects::Defect;
use crate::errors::ValidationError;
use crate::{Error, Result};

/// Lifecycle status of a notice. `Closed` is the only terminal status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum NoticeStatus {
    #[default]
    Received,
    UnderReview,
    ReplyFiled,
    HearingScheduled,
    OrderIssued,
    Appealed,
    Closed,
    Custom(String),
}

impl NoticeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            NoticeStatus::Received => "RECEIVED",
            NoticeStatus::UnderReview => "UNDER_REVIEW",
            NoticeStatus::ReplyFiled => "REPLY_FILED",
            NoticeStatus::HearingScheduled => "HEARING_SCHEDULED",
            NoticeStatus::OrderIssued => "ORDER_ISSUED",
            NoticeStatus::Appealed => "APPEALED",
            NoticeStatus::Closed => "CLOSED",
            NoticeStatus::Custom(value) => value.as_str(),
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, NoticeStatus::Closed)
    }
}

impl From<String> for NoticeStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "RECEIVED" => NoticeStatus::Received,
            "UNDER_REVIEW" => NoticeStatus::UnderReview,
            "REPLY_FILED" => NoticeStatus::ReplyFiled,
            "HEARING_SCHEDULED" => NoticeStatus::HearingScheduled,
            "ORDER_ISSUED" => NoticeStatus::OrderIssued,
            "APPEALED" => NoticeStatus::Appealed,
            "CLOSED" => NoticeStatus::Closed,
            _ => NoticeStatus::Custom(value),
        }
    }
}

impl From<&str> for NoticeStatus {
    fn from(value: &str) -> Self {
        NoticeStatus::from(value.to_string())
    }
}

impl From<NoticeStatus> for String {
    fn from(value: NoticeStatus) -> Self {
        value.as_str().to_string()
    }
}

/// Kind of communication received from the tax authority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NoticeType {
    ShowCause,
    Scrutiny,
    Intimation,
    DemandOrder,
    AuditObservation,
    Custom(String),
}

impl NoticeType {
    pub fn as_str(&self) -> &str {
        match self {
            NoticeType::ShowCause => "SHOW_CAUSE",
            NoticeType::Scrutiny => "SCRUTINY",
            NoticeType::Intimation => "INTIMATION",
            NoticeType::DemandOrder => "DEMAND_ORDER",
            NoticeType::AuditObservation => "AUDIT_OBSERVATION",
            NoticeType::Custom(value) => value.as_str(),
        }
    }
}

impl From<String> for NoticeType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SHOW_CAUSE" => NoticeType::ShowCause,
            "SCRUTINY" => NoticeType::Scrutiny,
            "INTIMATION" => NoticeType::Intimation,
            "DEMAND_ORDER" => NoticeType::DemandOrder,
            "AUDIT_OBSERVATION" => NoticeType::AuditObservation,
            _ => NoticeType::Custom(value),
        }
    }
}

impl From<&str> for NoticeType {
    fn from(value: &str) -> Self {
        NoticeType::from(value.to_string())
    }
}

impl From<NoticeType> for String {
    fn from(value: NoticeType) -> Self {
        value.as_str().to_string()
    }
}

/// Domain model representing a single tax-authority notice.
///
/// `demand_amount` is a cached aggregate of the notice's defects. It is only
/// ever written through a [`NoticeLedgerChange`], which carries the matching
/// defect writes. `version` increases on every write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: String,
    pub notice_number: String,
    pub gstin: String,
    /// Case reference grouping related notices
    pub arn: Option<String>,
    pub notice_type: NoticeType,
    pub section: Option<String>,
    pub financial_year: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub status: NoticeStatus,
    pub demand_amount: Decimal,
    pub version: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new notice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub notice_number: String,
    pub gstin: String,
    pub arn: Option<String>,
    pub notice_type: NoticeType,
    pub section: Option<String>,
    pub financial_year: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: NoticeStatus,
}

impl NewNotice {
    /// Validates the new notice data.
    pub fn validate(&self) -> Result<()> {
        if self.notice_number.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Notice number cannot be empty".to_string(),
            )));
        }
        validate_gstin(&self.gstin)?;
        validate_dates(self.issue_date, self.due_date)
    }
}

/// Input model for updating notice metadata.
///
/// The demand amount is not part of an update; it follows the defects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeUpdate {
    pub id: String,
    pub notice_number: String,
    pub gstin: String,
    pub arn: Option<String>,
    pub notice_type: NoticeType,
    pub section: Option<String>,
    pub financial_year: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub status: NoticeStatus,
}

impl NoticeUpdate {
    /// Validates the notice update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Notice ID is required for updates".to_string(),
            )));
        }
        if self.notice_number.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Notice number cannot be empty".to_string(),
            )));
        }
        validate_gstin(&self.gstin)?;
        validate_dates(self.issue_date, self.due_date)
    }
}

fn validate_gstin(gstin: &str) -> Result<()> {
    let gstin = gstin.trim();
    if gstin.is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "gstin".to_string(),
        )));
    }
    if gstin.len() != GSTIN_LENGTH || !gstin.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "GSTIN must be {} alphanumeric characters, got '{}'",
            GSTIN_LENGTH, gstin
        ))));
    }
    Ok(())
}

fn validate_dates(issue_date: Option<NaiveDate>, due_date: Option<NaiveDate>) -> Result<()> {
    if let (Some(issued), Some(due)) = (issue_date, due_date) {
        if due < issued {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Due date {} is before issue date {}",
                due, issued
            ))));
        }
    }
    Ok(())
}

/// Query filter for listing notices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeFilter {
    /// Keep only these statuses
    pub statuses: Option<Vec<NoticeStatus>>,
    /// Drop notices in the terminal `Closed` status
    #[serde(default)]
    pub exclude_closed: bool,
    /// Keep only notices whose due date is strictly before this date
    pub due_before: Option<NaiveDate>,
    pub gstin: Option<String>,
    pub arn: Option<String>,
}

impl NoticeFilter {
    /// Open notices that were already due before `date`.
    pub fn open_due_before(date: NaiveDate) -> Self {
        Self {
            exclude_closed: true,
            due_before: Some(date),
            ..Default::default()
        }
    }

    /// In-memory equivalent of the repository query.
    pub fn matches(&self, notice: &Notice) -> bool {
        if self.exclude_closed && notice.status.is_closed() {
            return false;
        }
        if let Some(statuses) = &self.statuses {
            if !statuses.contains(&notice.status) {
                return false;
            }
        }
        if let Some(limit) = self.due_before {
            match notice.due_date {
                Some(due) if due < limit => {}
                _ => return false,
            }
        }
        if let Some(gstin) = &self.gstin {
            if !notice.gstin.eq_ignore_ascii_case(gstin) {
                return false;
            }
        }
        if let Some(arn) = &self.arn {
            if notice.arn.as_deref() != Some(arn.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Atomic write unit for one notice's ledger.
///
/// Upserted defects, deleted defects and the recomputed demand are committed
/// together, and only if the notice is still at `expected_version`.
#[derive(Debug, Clone, PartialEq)]
pub struct NoticeLedgerChange {
    pub notice_id: String,
    pub expected_version: i64,
    pub demand_amount: Decimal,
    pub upserted_defects: Vec<Defect>,
    pub deleted_defect_ids: Vec<String>,
}

/// A notice whose cached demand disagrees with its defects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandDrift {
    pub notice_id: String,
    pub notice_number: String,
    pub stored_demand: Decimal,
    pub computed_demand: Decimal,
}
