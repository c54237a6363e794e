//! Audit log domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A recorded audit event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: String,
    pub entity_type: String,
    pub entity_id: String,
    pub action: String,
    pub actor: String,
    pub details: String,
    pub recorded_at: NaiveDateTime,
}

/// Input model for recording an audit event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewAuditEntry {
    pub entity_type: String,
    pub entity_id: String,
    pub action: String,
    pub actor: String,
    pub details: String,
    pub recorded_at: NaiveDateTime,
}
