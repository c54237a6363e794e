//! Demand aggregation over defect ledgers.
//!
//! A defect's totals are sums of one component across the four heads. A
//! notice's demand is the sum of the grand totals of all its defects. Both
//! functions are pure and idempotent.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::defects_model::Defect;
use crate::ledger::TaxComponent;

/// Head-summed totals of a single defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefectTotals {
    pub tax_demand: Decimal,
    pub interest_demand: Decimal,
    pub penalty_demand: Decimal,
    pub late_fee_demand: Decimal,
    pub others_demand: Decimal,
    pub grand_total: Decimal,
}

/// Sums every component of `defect` across the four heads.
pub fn recompute_defect_totals(defect: &Defect) -> DefectTotals {
    let ledger = &defect.ledger;
    DefectTotals {
        tax_demand: ledger.component_total(TaxComponent::Tax),
        interest_demand: ledger.component_total(TaxComponent::Interest),
        penalty_demand: ledger.component_total(TaxComponent::Penalty),
        late_fee_demand: ledger.component_total(TaxComponent::LateFee),
        others_demand: ledger.component_total(TaxComponent::Others),
        grand_total: ledger.grand_total(),
    }
}

/// Notice demand: the sum of each defect's grand total.
pub fn recompute_notice_demand(defects: &[Defect]) -> Decimal {
    defects
        .iter()
        .map(|defect| recompute_defect_totals(defect).grand_total)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defects::DefectType;
    use crate::ledger::{TaxHeadLedger, TaxHeadValues};
    use chrono::NaiveDateTime;
    use rust_decimal_macros::dec;

    fn defect(id: &str, ledger: TaxHeadLedger) -> Defect {
        Defect {
            id: id.to_string(),
            notice_id: "notice-1".to_string(),
            defect_type: DefectType::ItcMismatch,
            description: None,
            ledger,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_defect_totals_match_component_sums() {
        let d = defect(
            "d1",
            TaxHeadLedger {
                igst: TaxHeadValues::new(dec!(100), dec!(10), dec!(1), dec!(5), dec!(0)),
                cgst: TaxHeadValues::new(dec!(200), dec!(20), dec!(2), dec!(0), dec!(7)),
                sgst: TaxHeadValues::new(dec!(200), dec!(20), dec!(2), dec!(0), dec!(0)),
                cess: TaxHeadValues::new(dec!(50), dec!(0), dec!(0), dec!(0), dec!(0)),
            },
        );
        let totals = recompute_defect_totals(&d);
        assert_eq!(totals.tax_demand, dec!(550));
        assert_eq!(totals.interest_demand, dec!(50));
        assert_eq!(totals.penalty_demand, dec!(5));
        assert_eq!(totals.late_fee_demand, dec!(5));
        assert_eq!(totals.others_demand, dec!(7));
        assert_eq!(totals.grand_total, dec!(617));
        assert_eq!(totals.tax_demand, d.tax_demand());
        assert_eq!(totals.interest_demand, d.interest_demand());
        assert_eq!(totals.penalty_demand, d.penalty_demand());
    }

    #[test]
    fn test_notice_demand_sums_all_defects() {
        let mut first = TaxHeadLedger::default();
        first.igst = TaxHeadValues::new(dec!(250000), dec!(20000), dec!(0), dec!(0), dec!(0));
        let mut second = TaxHeadLedger::default();
        second.cgst = TaxHeadValues::new(dec!(1000), dec!(0), dec!(500), dec!(50), dec!(25));

        let defects = vec![defect("d1", first), defect("d2", second)];
        assert_eq!(recompute_notice_demand(&defects), dec!(271575));
    }

    #[test]
    fn test_notice_demand_of_no_defects_is_zero() {
        assert_eq!(recompute_notice_demand(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut ledger = TaxHeadLedger::default();
        ledger.sgst = TaxHeadValues::new(dec!(9), dec!(8), dec!(7), dec!(6), dec!(5));
        let defects = vec![defect("d1", ledger)];
        assert_eq!(
            recompute_notice_demand(&defects),
            recompute_notice_demand(&defects)
        );
        assert_eq!(
            recompute_defect_totals(&defects[0]),
            recompute_defect_totals(&defects[0])
        );
    }
}
