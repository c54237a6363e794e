//! Planning phase of the bulk interest recompute.
//!
//! Planning is pure: it reads notices and defects and returns the change
//! sets a commit would apply. Nothing is written here, so a failed plan
//! leaves storage untouched.

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::defects::{recompute_notice_demand, Defect};
use crate::errors::Result;
use crate::interest::{elapsed_days, interest_for_days};
use crate::ledger::TaxHead;
use crate::notices::{Notice, NoticeLedgerChange};

/// Builds one ledger change per notice whose interest moves.
///
/// A notice is in scope when it is not closed, has a due date, and
/// `target_date` is strictly after that due date. Every head's interest is
/// re-derived from that head's tax; tax, penalty, late fee and others are
/// left as they are. Defects whose interest is already current are not part
/// of the change, and notices with no changed defect produce no change.
///
/// Fails without a partial plan when any head's interest is out of range.
pub fn plan_interest_recompute(
    notices: &[Notice],
    defects_by_notice: &HashMap<String, Vec<Defect>>,
    target_date: NaiveDate,
    annual_rate_percent: Decimal,
) -> Result<Vec<NoticeLedgerChange>> {
    let mut changes = Vec::new();

    for notice in notices {
        if notice.status.is_closed() {
            continue;
        }
        let Some(due_date) = notice.due_date else {
            continue;
        };
        let days = elapsed_days(due_date, target_date);
        if days <= 0 {
            continue;
        }

        let defects = match defects_by_notice.get(&notice.id) {
            Some(defects) => defects,
            None => continue,
        };

        let mut after = Vec::with_capacity(defects.len());
        let mut upserted = Vec::new();
        for defect in defects {
            match reprice_defect(defect, annual_rate_percent, days)? {
                Some(updated) => {
                    upserted.push(updated.clone());
                    after.push(updated);
                }
                None => after.push(defect.clone()),
            }
        }

        if upserted.is_empty() {
            continue;
        }

        debug!(
            "Notice {}: {} of {} defects repriced over {} days",
            notice.id,
            upserted.len(),
            defects.len(),
            days
        );
        changes.push(NoticeLedgerChange {
            notice_id: notice.id.clone(),
            expected_version: notice.version,
            demand_amount: recompute_notice_demand(&after),
            upserted_defects: upserted,
            deleted_defect_ids: Vec::new(),
        });
    }

    Ok(changes)
}

/// The defect with fresh interest on every head, or `None` when nothing moves.
fn reprice_defect(
    defect: &Defect,
    annual_rate_percent: Decimal,
    days: i64,
) -> Result<Option<Defect>> {
    let mut ledger = defect.ledger;
    let mut changed = false;

    for head in TaxHead::ALL {
        let values = ledger.head_mut(head);
        let interest = interest_for_days(values.tax, annual_rate_percent, days)?;
        if interest != values.interest {
            values.interest = interest;
            changed = true;
        }
    }

    Ok(changed.then(|| Defect {
        ledger,
        ..defect.clone()
    }))
}
