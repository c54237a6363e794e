//! Defect domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::ledger::{TaxComponent, TaxHeadLedger};
use crate::{Error, Result};

/// Category of an itemized demand component.
///
/// The well-known categories are closed variants; anything else is carried
/// verbatim in `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DefectType {
    /// Input tax credit claimed does not match supplier filings
    ItcMismatch,
    /// Output tax declared is lower than tax payable
    OutputTaxShortPaid,
    /// Credit availed in excess of eligibility
    ExcessItcClaimed,
    /// Tax payable under reverse charge was not paid
    ReverseChargeNotPaid,
    /// Return filed after its due date
    LateFiling,
    /// Refund granted in excess
    ExcessRefund,
    Custom(String),
}

impl DefectType {
    pub fn as_str(&self) -> &str {
        match self {
            DefectType::ItcMismatch => "ITC_MISMATCH",
            DefectType::OutputTaxShortPaid => "OUTPUT_TAX_SHORT_PAID",
            DefectType::ExcessItcClaimed => "EXCESS_ITC_CLAIMED",
            DefectType::ReverseChargeNotPaid => "REVERSE_CHARGE_NOT_PAID",
            DefectType::LateFiling => "LATE_FILING",
            DefectType::ExcessRefund => "EXCESS_REFUND",
            DefectType::Custom(value) => value.as_str(),
        }
    }
}

impl From<String> for DefectType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ITC_MISMATCH" => DefectType::ItcMismatch,
            "OUTPUT_TAX_SHORT_PAID" => DefectType::OutputTaxShortPaid,
            "EXCESS_ITC_CLAIMED" => DefectType::ExcessItcClaimed,
            "REVERSE_CHARGE_NOT_PAID" => DefectType::ReverseChargeNotPaid,
            "LATE_FILING" => DefectType::LateFiling,
            "EXCESS_REFUND" => DefectType::ExcessRefund,
            _ => DefectType::Custom(value),
        }
    }
}

impl From<&str> for DefectType {
    fn from(value: &str) -> Self {
        DefectType::from(value.to_string())
    }
}

impl From<DefectType> for String {
    fn from(value: DefectType) -> Self {
        value.as_str().to_string()
    }
}

/// Domain model representing one itemized charge within a notice.
///
/// Demand totals are derived from the ledger on every read and are never
/// stored, so they cannot drift from the per-head values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Defect {
    pub id: String,
    pub notice_id: String,
    pub defect_type: DefectType,
    pub description: Option<String>,
    pub ledger: TaxHeadLedger,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Defect {
    /// Sum of `tax` across the four heads.
    pub fn tax_demand(&self) -> Decimal {
        self.ledger.component_total(TaxComponent::Tax)
    }

    /// Sum of `interest` across the four heads.
    pub fn interest_demand(&self) -> Decimal {
        self.ledger.component_total(TaxComponent::Interest)
    }

    /// Sum of `penalty` across the four heads.
    pub fn penalty_demand(&self) -> Decimal {
        self.ledger.component_total(TaxComponent::Penalty)
    }

    /// Sum of all five components across the four heads.
    pub fn total_demand(&self) -> Decimal {
        self.ledger.grand_total()
    }
}

/// Input model for creating a new defect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDefect {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub notice_id: String,
    pub defect_type: DefectType,
    pub description: Option<String>,
    #[serde(default)]
    pub ledger: TaxHeadLedger,
}

impl NewDefect {
    pub fn validate(&self) -> Result<()> {
        if self.notice_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "noticeId".to_string(),
            )));
        }
        if self.defect_type.as_str().trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Defect type cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating an existing defect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefectUpdate {
    pub id: String,
    pub defect_type: DefectType,
    pub description: Option<String>,
    pub ledger: TaxHeadLedger,
}

impl DefectUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Defect ID is required for updates".to_string(),
            )));
        }
        if self.defect_type.as_str().trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Defect type cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}
