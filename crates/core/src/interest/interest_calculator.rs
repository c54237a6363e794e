//! Simple interest accrual on outstanding tax.
//!
//! Interest is simple interest on a 365-day year, rounded half-up to whole
//! currency units:
//!
//! ```text
//! interest = round(principal * annual_rate_percent * elapsed_days / 36500)
//! ```
//!
//! Every function here is pure. Callers that must not reduce a stored figure
//! check [`elapsed_days`] first and skip the record when it is not positive.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{INTEREST_DECIMAL_PLACES, INTEREST_DIVISOR};
use crate::errors::Result;
use crate::Error;

/// Whole calendar days from `from_date` to `to_date`. Negative when `to_date` is earlier.
pub fn elapsed_days(from_date: NaiveDate, to_date: NaiveDate) -> i64 {
    (to_date - from_date).num_days()
}

/// Computes interest owed on `principal` between two dates.
///
/// Returns zero when the principal is zero or when `to_date` is not after
/// `from_date`. Fails when the product does not fit in a `Decimal`.
pub fn compute_interest(
    principal: Decimal,
    annual_rate_percent: Decimal,
    from_date: NaiveDate,
    to_date: NaiveDate,
) -> Result<Decimal> {
    interest_for_days(
        principal,
        annual_rate_percent,
        elapsed_days(from_date, to_date),
    )
}

/// Same as [`compute_interest`] with the day count already known.
pub fn interest_for_days(
    principal: Decimal,
    annual_rate_percent: Decimal,
    days: i64,
) -> Result<Decimal> {
    if days <= 0 || principal.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let raw = principal
        .checked_mul(annual_rate_percent)
        .and_then(|v| v.checked_mul(Decimal::from(days)))
        .and_then(|v| v.checked_div(INTEREST_DIVISOR))
        .ok_or_else(|| {
            Error::invalid_input(format!(
                "Interest on {} at {}% for {} days is out of range",
                principal, annual_rate_percent, days
            ))
        })?;
    Ok(raw.round_dp_with_strategy(
        INTEREST_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    ))
}

/// Rejects rates that are not strictly positive.
pub fn validate_annual_rate(annual_rate_percent: Decimal) -> Result<()> {
    if annual_rate_percent <= Decimal::ZERO {
        return Err(Error::invalid_input(format!(
            "Annual interest rate must be greater than zero, got {}",
            annual_rate_percent
        )));
    }
    Ok(())
}
