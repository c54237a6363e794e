//! Payment domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::ledger::TaxHead;
use crate::{Error, Result};

/// Domain model representing a payment made against a notice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub notice_id: String,
    /// Set when the payment settles a specific defect
    pub defect_id: Option<String>,
    pub head: Option<TaxHead>,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    /// Challan or transaction reference
    pub reference: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Input model for recording a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub notice_id: String,
    pub defect_id: Option<String>,
    pub head: Option<TaxHead>,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub reference: Option<String>,
}

impl NewPayment {
    pub fn validate(&self) -> Result<()> {
        if self.notice_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "noticeId".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Payment amount must be greater than zero, got {}",
                self.amount
            ))));
        }
        Ok(())
    }
}
