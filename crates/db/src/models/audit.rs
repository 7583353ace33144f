//! Audit entry model.

use fleetlog_core::types::{DbId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `audit_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditEntry {
    pub id: DbId,
    pub user_id: UserId,
    pub entity: String,
    pub entity_id: DbId,
    pub action: String,
    pub created_at: Timestamp,
}

/// Fields for recording a new audit entry.
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub user_id: UserId,
    pub entity: &'static str,
    pub entity_id: DbId,
    pub action: fleetlog_core::audit::AuditAction,
}
