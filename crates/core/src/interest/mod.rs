//! Interest module - statutory simple interest accrual.

mod interest_calculator;

pub use interest_calculator::{
    compute_interest, elapsed_days, interest_for_days, validate_annual_rate,
};
