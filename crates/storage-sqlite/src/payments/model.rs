//! Database models for payments.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::{decimal_to_db, parse_decimal_tolerant};
use taxcase_core::ledger::TaxHead;
use taxcase_core::payments::{NewPayment, Payment};

#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::payments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PaymentDB {
    pub id: String,
    pub notice_id: String,
    pub defect_id: Option<String>,
    pub head: Option<String>,
    pub amount: String,
    pub payment_date: NaiveDate,
    pub reference: Option<String>,
    pub created_at: NaiveDateTime,
}

impl PaymentDB {
    pub fn from_new(new_payment: NewPayment, id: String, now: NaiveDateTime) -> Self {
        Self {
            id,
            notice_id: new_payment.notice_id,
            defect_id: new_payment.defect_id,
            head: new_payment.head.map(|h| h.as_str().to_string()),
            amount: decimal_to_db(new_payment.amount),
            payment_date: new_payment.payment_date,
            reference: new_payment.reference,
            created_at: now,
        }
    }
}

impl From<PaymentDB> for Payment {
    fn from(db: PaymentDB) -> Self {
        let head = db.head.as_deref().and_then(|code| {
            let parsed = TaxHead::parse(code);
            if parsed.is_none() {
                log::warn!("Payment {} has unknown tax head '{}'", db.id, code);
            }
            parsed
        });
        Payment {
            amount: parse_decimal_tolerant(&db.amount, "amount"),
            id: db.id,
            notice_id: db.notice_id,
            defect_id: db.defect_id,
            head,
            payment_date: db.payment_date,
            reference: db.reference,
            created_at: db.created_at,
        }
    }
}
