//! Database models for defects.
//!
//! The ledger is flattened into one text column per head and component.
//! Demand totals are not stored; they are derived from the ledger on read.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::{decimal_to_db, parse_decimal_tolerant};
use taxcase_core::defects::{Defect, DefectType};
use taxcase_core::ledger::{TaxHead, TaxHeadLedger, TaxHeadValues};

/// Database model for defects
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::defects)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct DefectDB {
    pub id: String,
    pub notice_id: String,
    pub defect_type: String,
    pub description: Option<String>,
    pub igst_tax: String,
    pub igst_interest: String,
    pub igst_penalty: String,
    pub igst_late_fee: String,
    pub igst_others: String,
    pub cgst_tax: String,
    pub cgst_interest: String,
    pub cgst_penalty: String,
    pub cgst_late_fee: String,
    pub cgst_others: String,
    pub sgst_tax: String,
    pub sgst_interest: String,
    pub sgst_penalty: String,
    pub sgst_late_fee: String,
    pub sgst_others: String,
    pub cess_tax: String,
    pub cess_interest: String,
    pub cess_penalty: String,
    pub cess_late_fee: String,
    pub cess_others: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Column names of one head, in `tax, interest, penalty, late_fee, others` order.
fn head_columns(head: TaxHead) -> [&'static str; 5] {
    match head {
        TaxHead::Igst => ["igst_tax", "igst_interest", "igst_penalty", "igst_late_fee", "igst_others"],
        TaxHead::Cgst => ["cgst_tax", "cgst_interest", "cgst_penalty", "cgst_late_fee", "cgst_others"],
        TaxHead::Sgst => ["sgst_tax", "sgst_interest", "sgst_penalty", "sgst_late_fee", "sgst_others"],
        TaxHead::Cess => ["cess_tax", "cess_interest", "cess_penalty", "cess_late_fee", "cess_others"],
    }
}

fn head_from_db(
    head: TaxHead,
    tax: &str,
    interest: &str,
    penalty: &str,
    late_fee: &str,
    others: &str,
) -> TaxHeadValues {
    let [tax_col, interest_col, penalty_col, late_fee_col, others_col] = head_columns(head);
    TaxHeadValues::new(
        parse_decimal_tolerant(tax, tax_col),
        parse_decimal_tolerant(interest, interest_col),
        parse_decimal_tolerant(penalty, penalty_col),
        parse_decimal_tolerant(late_fee, late_fee_col),
        parse_decimal_tolerant(others, others_col),
    )
}

impl From<DefectDB> for Defect {
    fn from(db: DefectDB) -> Self {
        let ledger = TaxHeadLedger {
            igst: head_from_db(
                TaxHead::Igst,
                &db.igst_tax,
                &db.igst_interest,
                &db.igst_penalty,
                &db.igst_late_fee,
                &db.igst_others,
            ),
            cgst: head_from_db(
                TaxHead::Cgst,
                &db.cgst_tax,
                &db.cgst_interest,
                &db.cgst_penalty,
                &db.cgst_late_fee,
                &db.cgst_others,
            ),
            sgst: head_from_db(
                TaxHead::Sgst,
                &db.sgst_tax,
                &db.sgst_interest,
                &db.sgst_penalty,
                &db.sgst_late_fee,
                &db.sgst_others,
            ),
            cess: head_from_db(
                TaxHead::Cess,
                &db.cess_tax,
                &db.cess_interest,
                &db.cess_penalty,
                &db.cess_late_fee,
                &db.cess_others,
            ),
        };

        Defect {
            id: db.id,
            notice_id: db.notice_id,
            defect_type: DefectType::from(db.defect_type),
            description: db.description,
            ledger,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<&Defect> for DefectDB {
    fn from(defect: &Defect) -> Self {
        let l = &defect.ledger;
        Self {
            id: defect.id.clone(),
            notice_id: defect.notice_id.clone(),
            defect_type: defect.defect_type.as_str().to_string(),
            description: defect.description.clone(),
            igst_tax: decimal_to_db(l.igst.tax),
            igst_interest: decimal_to_db(l.igst.interest),
            igst_penalty: decimal_to_db(l.igst.penalty),
            igst_late_fee: decimal_to_db(l.igst.late_fee),
            igst_others: decimal_to_db(l.igst.others),
            cgst_tax: decimal_to_db(l.cgst.tax),
            cgst_interest: decimal_to_db(l.cgst.interest),
            cgst_penalty: decimal_to_db(l.cgst.penalty),
            cgst_late_fee: decimal_to_db(l.cgst.late_fee),
            cgst_others: decimal_to_db(l.cgst.others),
            sgst_tax: decimal_to_db(l.sgst.tax),
            sgst_interest: decimal_to_db(l.sgst.interest),
            sgst_penalty: decimal_to_db(l.sgst.penalty),
            sgst_late_fee: decimal_to_db(l.sgst.late_fee),
            sgst_others: decimal_to_db(l.sgst.others),
            cess_tax: decimal_to_db(l.cess.tax),
            cess_interest: decimal_to_db(l.cess.interest),
            cess_penalty: decimal_to_db(l.cess.penalty),
            cess_late_fee: decimal_to_db(l.cess.late_fee),
            cess_others: decimal_to_db(l.cess.others),
            created_at: defect.created_at,
            updated_at: defect.updated_at,
        }
    }
}
