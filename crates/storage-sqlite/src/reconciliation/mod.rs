//! SQLite storage implementation for reconciliation worksheets.

mod model;
mod repository;

pub use model::ReconciliationRecordDB;
pub use repository::ReconciliationRepository;
