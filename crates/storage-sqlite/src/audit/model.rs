//! Database model for audit entries.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use taxcase_core::audit::{AuditEntry, NewAuditEntry};

#[derive(Queryable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::audit_log)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuditEntryDB {
    pub id: String,
    pub entity_type: String,
    pub entity_id: String,
    pub action: String,
    pub actor: String,
    pub details: String,
    pub recorded_at: NaiveDateTime,
}

impl AuditEntryDB {
    pub fn from_new(entry: NewAuditEntry, id: String) -> Self {
        Self {
            id,
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            action: entry.action,
            actor: entry.actor,
            details: entry.details,
            recorded_at: entry.recorded_at,
        }
    }
}

impl From<AuditEntryDB> for AuditEntry {
    fn from(db: AuditEntryDB) -> Self {
        AuditEntry {
            id: db.id,
            entity_type: db.entity_type,
            entity_id: db.entity_id,
            action: db.action,
            actor: db.actor,
            details: db.details,
            recorded_at: db.recorded_at,
        }
    }
}
