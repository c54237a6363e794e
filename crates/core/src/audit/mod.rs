//! Audit module - batch-level audit trail.

mod audit_model;
mod audit_traits;

pub use audit_model::{AuditEntry, NewAuditEntry};
pub use audit_traits::AuditLogRepositoryTrait;
