//! Utility functions for SQLite storage operations.
//!
//! This module provides helpers for working with SQLite, including chunking
//! utilities to avoid parameter limits and the text encoding of amounts.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Maximum number of parameters for SQLite IN (...) queries.
///
/// SQLite caps bound parameters per statement (SQLITE_MAX_VARIABLE_NUMBER,
/// often 999). Notice id lists are split into chunks of this size.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Splits `items` into slices small enough for one `IN (...)` clause.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

/// Amounts are stored as decimal text so no precision is lost.
pub fn decimal_to_db(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Parses a stored amount, falling back to zero on malformed text.
///
/// A bad value is logged rather than failing the whole read.
pub fn parse_decimal_tolerant(value_str: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value_str.trim()) {
        Ok(d) => d,
        Err(e_decimal) => match Decimal::from_scientific(value_str.trim()) {
            Ok(d) => d,
            Err(e_scientific) => {
                log::error!(
                    "Failed to parse {} '{}': as Decimal (err: {}), and as scientific (err: {}). Falling back to ZERO.",
                    field_name, value_str, e_decimal, e_scientific
                );
                Decimal::ZERO
            }
        },
    }
}
