//! Audit log repository trait.

use async_trait::async_trait;

use super::audit_model::{AuditEntry, NewAuditEntry};
use crate::errors::Result;

/// Append-only audit storage.
///
/// Callers record one entry per logical operation, never one per row.
#[async_trait]
pub trait AuditLogRepositoryTrait: Send + Sync {
    async fn record(&self, entry: NewAuditEntry) -> Result<AuditEntry>;

    /// Entries for one entity, newest first.
    fn list_for_entity(&self, entity_type: &str, entity_id: &str) -> Result<Vec<AuditEntry>>;
}
