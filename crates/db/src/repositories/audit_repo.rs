//! Repository for the append-only `audit_entries` table.

use sqlx::PgPool;

use crate::models::audit::{AuditEntry, NewAuditEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, entity, entity_id, action, created_at";

/// Records who changed which entity. Entries are never updated or deleted.
pub struct AuditRepo;

impl AuditRepo {
    /// Insert one audit entry, returning the created row.
    pub async fn record(pool: &PgPool, entry: &NewAuditEntry) -> Result<AuditEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_entries (user_id, entity, entity_id, action)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditEntry>(&query)
            .bind(entry.user_id)
            .bind(entry.entity)
            .bind(entry.entity_id)
            .bind(entry.action.as_str())
            .fetch_one(pool)
            .await
    }
}
