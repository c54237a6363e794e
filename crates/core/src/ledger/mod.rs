//! Ledger module - tax head breakdown shared by defects and payments.

mod ledger_model;


pub use ledger_model::{TaxComponent, TaxHead, TaxHeadLedger, TaxHeadValues};
