//! SQLite storage implementation for the audit log.

mod model;
mod repository;

pub use model::AuditEntryDB;
pub use repository::AuditLogRepository;
