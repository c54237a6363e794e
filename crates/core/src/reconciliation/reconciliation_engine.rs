//! Period-wise variance between two reported figures.
//!
//! Every write to a source column re-derives that row's diff before
//! returning, so `diff == source_a - source_b` holds for every row at all
//! times. Totals are never cached: the worksheet has a fixed twelve rows.

use log::debug;
use rust_decimal::Decimal;

use super::reconciliation_model::{
    CellValue, ImportOutcome, ImportedPeriodRow, PeriodMatchPolicy, ReconciliationRecord,
    ReconciliationTotals,
};
use crate::errors::ValidationError;
use crate::{Error, Result};

/// Writes one cell. Source writes re-derive the row's diff; remarks do not touch it.
pub fn set_cell(record: &mut ReconciliationRecord, row_index: usize, value: CellValue) -> Result<()> {
    let row_count = record.rows().len();
    let row = record.rows_mut().get_mut(row_index).ok_or_else(|| {
        Error::Validation(ValidationError::InvalidInput(format!(
            "Row index {} is out of range (worksheet has {} rows)",
            row_index, row_count
        )))
    })?;

    match value {
        CellValue::SourceA(amount) => row.set_source_a(amount),
        CellValue::SourceB(amount) => row.set_source_b(amount),
        CellValue::Remarks(text) => row.set_remarks(text),
    }
    Ok(())
}

/// Column sums over all rows.
pub fn totals(record: &ReconciliationRecord) -> ReconciliationTotals {
    record
        .rows()
        .iter()
        .fold(ReconciliationTotals::default(), |acc, row| ReconciliationTotals {
            sum_a: acc.sum_a + row.source_a(),
            sum_b: acc.sum_b + row.source_b(),
            sum_diff: acc.sum_diff + row.diff(),
        })
}

/// Merges imported rows into the worksheet.
///
/// For each worksheet period, the first imported row that matches under
/// `policy` overwrites both sources and the remarks. Periods without a match
/// keep their values.
pub fn merge_import(
    record: &mut ReconciliationRecord,
    imported: &[ImportedPeriodRow],
    policy: PeriodMatchPolicy,
) -> ImportOutcome {
    let mut outcome = ImportOutcome::default();
    let mut used = vec![false; imported.len()];

    for row in record.rows_mut().iter_mut() {
        let found = imported
            .iter()
            .enumerate()
            .find(|(_, candidate)| period_matches(&candidate.period, row.period(), policy));

        if let Some((index, source)) = found {
            used[index] = true;
            row.set_source_a(source.source_a.unwrap_or(Decimal::ZERO));
            row.set_source_b(source.source_b.unwrap_or(Decimal::ZERO));
            row.set_remarks(source.remarks.clone().unwrap_or_default());
            outcome.matched_periods.push(row.period().to_string());
        }
    }

    outcome.unmatched_rows = imported
        .iter()
        .zip(used)
        .filter(|(_, was_used)| !was_used)
        .map(|(row, _)| row.period.clone())
        .collect();

    debug!(
        "Merged import into worksheet {}: {} periods matched, {} rows unmatched",
        record.id,
        outcome.matched_periods.len(),
        outcome.unmatched_rows.len()
    );
    outcome
}

/// Whether an imported label refers to a canonical month period.
pub fn period_matches(label: &str, period: &str, policy: PeriodMatchPolicy) -> bool {
    let label = label.trim().to_lowercase();
    let period = period.trim().to_lowercase();
    if label.is_empty() || period.is_empty() {
        return false;
    }

    match policy {
        PeriodMatchPolicy::Contains => label.contains(&period),
        PeriodMatchPolicy::Exact => {
            let (month, rest) = match label.find(['-', ' ', '/', '\'']) {
                Some(split) => (&label[..split], label[split + 1..].trim()),
                None => (label.as_str(), ""),
            };
            if !rest.chars().all(|c| c.is_ascii_digit()) {
                return false;
            }
            month == period || is_month_abbreviation(month, &period)
        }
    }
}

fn is_month_abbreviation(candidate: &str, month: &str) -> bool {
    (candidate.len() == 3 || (month == "september" && candidate == "sept"))
        && month.starts_with(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconciliation::{blank_rows, ReconciliationType};
    use chrono::NaiveDateTime;
    use rust_decimal_macros::dec;

    fn worksheet() -> ReconciliationRecord {
        ReconciliationRecord::from_parts(
            "rec-1".to_string(),
            ReconciliationType::BooksVsReturn,
            "27AAAAA0000A1Z5".to_string(),
            "2023-24".to_string(),
            None,
            None,
            blank_rows(),
            NaiveDateTime::default(),
            NaiveDateTime::default(),
        )
        .unwrap()
    }

    fn imported(period: &str, a: i64, b: i64) -> ImportedPeriodRow {
        ImportedPeriodRow {
            period: period.to_string(),
            source_a: Some(Decimal::from(a)),
            source_b: Some(Decimal::from(b)),
            remarks: Some(format!("from {}", period)),
        }
    }

    #[test]
    fn test_blank_worksheet_has_twelve_zero_rows_in_year_order() {
        let record = worksheet();
        assert_eq!(record.rows().len(), 12);
        assert_eq!(record.rows()[0].period(), "April");
        assert_eq!(record.rows()[11].period(), "March");
        assert_eq!(totals(&record), ReconciliationTotals::default());
    }

    #[test]
    fn test_source_writes_recompute_diff() {
        let mut record = worksheet();
        set_cell(&mut record, 2, CellValue::SourceA(dec!(1500))).unwrap();
        assert_eq!(record.rows()[2].diff(), dec!(1500));
        set_cell(&mut record, 2, CellValue::SourceB(dec!(1750))).unwrap();
        assert_eq!(record.rows()[2].diff(), dec!(-250));
    }

    #[test]
    fn test_remarks_write_leaves_diff_alone() {
        let mut record = worksheet();
        set_cell(&mut record, 0, CellValue::SourceA(dec!(10))).unwrap();
        set_cell(&mut record, 0, CellValue::Remarks("checked".to_string())).unwrap();
        assert_eq!(record.rows()[0].diff(), dec!(10));
        assert_eq!(record.rows()[0].remarks(), "checked");
    }

    #[test]
    fn test_out_of_range_row_is_rejected() {
        let mut record = worksheet();
        let err = set_cell(&mut record, 12, CellValue::SourceA(dec!(1))).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_totals_obey_diff_law() {
        let mut record = worksheet();
        for (index, (a, b)) in [(100, 90), (50, 75), (0, 20), (1000, 1000)].iter().enumerate() {
            set_cell(&mut record, index, CellValue::SourceA(Decimal::from(*a))).unwrap();
            set_cell(&mut record, index, CellValue::SourceB(Decimal::from(*b))).unwrap();
        }
        let sums = totals(&record);
        assert_eq!(sums.sum_a, dec!(1150));
        assert_eq!(sums.sum_b, dec!(1185));
        assert_eq!(sums.sum_diff, dec!(-35));
        assert_eq!(sums.sum_diff, sums.sum_a - sums.sum_b);
    }

    #[test]
    fn test_exact_import_matches_names_abbreviations_and_years() {
        let mut record = worksheet();
        let outcome = merge_import(
            &mut record,
            &[
                imported("APRIL", 10, 5),
                imported("May-2023", 20, 25),
                imported("jun 23", 30, 30),
                imported("Sept", 40, 0),
                imported("Q1 total", 999, 0),
            ],
            PeriodMatchPolicy::Exact,
        );

        assert_eq!(
            outcome.matched_periods,
            vec!["April", "May", "June", "September"]
        );
        assert_eq!(outcome.unmatched_rows, vec!["Q1 total"]);
        assert_eq!(record.rows()[0].diff(), dec!(5));
        assert_eq!(record.rows()[1].diff(), dec!(-5));
        assert_eq!(record.rows()[5].source_a(), dec!(40));
        assert_eq!(record.rows()[0].remarks(), "from APRIL");
    }

    #[test]
    fn test_unmatched_periods_keep_prior_values() {
        let mut record = worksheet();
        set_cell(&mut record, 3, CellValue::SourceA(dec!(77))).unwrap();
        merge_import(&mut record, &[imported("April", 1, 1)], PeriodMatchPolicy::Exact);
        assert_eq!(record.rows()[3].source_a(), dec!(77));
        assert_eq!(record.rows()[3].diff(), dec!(77));
    }

    #[test]
    fn test_exact_policy_rejects_labels_with_extra_words() {
        assert!(!period_matches("June adjustments", "June", PeriodMatchPolicy::Exact));
        assert!(!period_matches("Junk", "June", PeriodMatchPolicy::Exact));
        assert!(period_matches("June-2023", "June", PeriodMatchPolicy::Exact));
        assert!(period_matches(" jun ", "June", PeriodMatchPolicy::Exact));
    }

    #[test]
    fn test_contains_policy_keeps_substring_behaviour() {
        assert!(period_matches("June adjustments", "June", PeriodMatchPolicy::Contains));
        assert!(period_matches("June-2023", "june", PeriodMatchPolicy::Contains));
        assert!(!period_matches("Jun", "June", PeriodMatchPolicy::Contains));
    }

    #[test]
    fn test_contains_policy_first_match_wins() {
        let mut record = worksheet();
        merge_import(
            &mut record,
            &[imported("June", 1, 0), imported("June-2023", 2, 0)],
            PeriodMatchPolicy::Contains,
        );
        assert_eq!(record.rows()[2].source_a(), dec!(1));
    }

    #[test]
    fn test_missing_imported_amounts_become_zero() {
        let mut record = worksheet();
        set_cell(&mut record, 0, CellValue::SourceB(dec!(5))).unwrap();
        merge_import(
            &mut record,
            &[ImportedPeriodRow {
                period: "April".to_string(),
                source_a: Some(dec!(12)),
                source_b: None,
                remarks: None,
            }],
            PeriodMatchPolicy::Exact,
        );
        assert_eq!(record.rows()[0].source_b(), Decimal::ZERO);
        assert_eq!(record.rows()[0].diff(), dec!(12));
        assert_eq!(record.rows()[0].remarks(), "");
    }
}
