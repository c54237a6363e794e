//! Database models for notices.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::{decimal_to_db, parse_decimal_tolerant};
use taxcase_core::notices::{NewNotice, Notice, NoticeStatus, NoticeType, NoticeUpdate};

/// Database model for notices
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::notices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct NoticeDB {
    pub id: String,
    pub notice_number: String,
    pub gstin: String,
    pub arn: Option<String>,
    pub notice_type: String,
    pub section: Option<String>,
    pub financial_year: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub demand_amount: String,
    pub version: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Metadata columns written by a notice update.
///
/// Demand and version are left to the ledger write path.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::notices)]
#[diesel(treat_none_as_null = true)]
pub struct NoticeMetadataDB {
    pub notice_number: String,
    pub gstin: String,
    pub arn: Option<String>,
    pub notice_type: String,
    pub section: Option<String>,
    pub financial_year: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub updated_at: NaiveDateTime,
}

impl NoticeDB {
    pub fn from_new(new_notice: NewNotice, id: String, now: NaiveDateTime) -> Self {
        Self {
            id,
            notice_number: new_notice.notice_number.trim().to_string(),
            gstin: normalize_gstin(&new_notice.gstin),
            arn: new_notice.arn,
            notice_type: new_notice.notice_type.as_str().to_string(),
            section: new_notice.section,
            financial_year: new_notice.financial_year,
            issue_date: new_notice.issue_date,
            due_date: new_notice.due_date,
            status: new_notice.status.as_str().to_string(),
            demand_amount: "0".to_string(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

impl NoticeMetadataDB {
    pub fn from_update(update: NoticeUpdate, now: NaiveDateTime) -> Self {
        Self {
            notice_number: update.notice_number.trim().to_string(),
            gstin: normalize_gstin(&update.gstin),
            arn: update.arn,
            notice_type: update.notice_type.as_str().to_string(),
            section: update.section,
            financial_year: update.financial_year,
            issue_date: update.issue_date,
            due_date: update.due_date,
            status: update.status.as_str().to_string(),
            updated_at: now,
        }
    }
}

/// GSTINs are stored upper-case so equality filters can run in SQL.
pub fn normalize_gstin(gstin: &str) -> String {
    gstin.trim().to_ascii_uppercase()
}

impl From<NoticeDB> for Notice {
    fn from(db: NoticeDB) -> Self {
        let demand_amount = parse_decimal_tolerant(&db.demand_amount, "demand_amount");
        Notice {
            id: db.id,
            notice_number: db.notice_number,
            gstin: db.gstin,
            arn: db.arn,
            notice_type: NoticeType::from(db.notice_type),
            section: db.section,
            financial_year: db.financial_year,
            issue_date: db.issue_date,
            due_date: db.due_date,
            status: NoticeStatus::from(db.status),
            demand_amount,
            version: db.version,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<&Notice> for NoticeDB {
    fn from(notice: &Notice) -> Self {
        Self {
            id: notice.id.clone(),
            notice_number: notice.notice_number.clone(),
            gstin: normalize_gstin(&notice.gstin),
            arn: notice.arn.clone(),
            notice_type: notice.notice_type.as_str().to_string(),
            section: notice.section.clone(),
            financial_year: notice.financial_year.clone(),
            issue_date: notice.issue_date,
            due_date: notice.due_date,
            status: notice.status.as_str().to_string(),
            demand_amount: decimal_to_db(notice.demand_amount),
            version: notice.version,
            created_at: notice.created_at,
            updated_at: notice.updated_at,
        }
    }
}
