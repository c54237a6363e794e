//! Taxcase Core - Tax liability computation and reconciliation engine.
//!
//! This crate holds the domain models, the pure computation rules (interest
//! accrual, demand aggregation, period reconciliation) and the services that
//! apply them. It is database-agnostic and defines repository traits that
//! are implemented by the `storage-sqlite` crate.

pub mod audit;
pub mod constants;
pub mod defects;
pub mod errors;
pub mod interest;
pub mod interest_recompute;
pub mod ledger;
pub mod notices;
pub mod payments;
pub mod reconciliation;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
