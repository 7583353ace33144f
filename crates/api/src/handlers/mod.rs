//! Request handlers, one module per resource.

pub mod equipment;
pub mod fuel_log;
pub mod meter_reading;
pub mod service_record;
pub mod service_type;
pub mod supplier;

use fleetlog_core::audit::AuditAction;
use fleetlog_core::error::CoreError;
use fleetlog_core::types::{DbId, UserId};
use fleetlog_db::models::audit::NewAuditEntry;
use fleetlog_db::repositories::AuditRepo;
use fleetlog_db::DbPool;

use crate::error::AppError;

/// Reject empty or whitespace-only required text fields.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "{field} must not be empty"
        ))));
    }
    Ok(())
}

/// Reject negative numeric fields.
pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<(), AppError> {
    if value < 0.0 {
        return Err(AppError::Core(CoreError::Validation(format!(
            "{field} must not be negative"
        ))));
    }
    Ok(())
}

/// Record an audit entry without blocking the response.
///
/// The audit trail is not required for correctness of the write it
/// describes, so failures are logged and dropped.
pub(crate) fn record_audit(
    pool: &DbPool,
    user_id: UserId,
    entity: &'static str,
    entity_id: DbId,
    action: AuditAction,
) {
    let pool = pool.clone();
    tokio::spawn(async move {
        let entry = NewAuditEntry {
            user_id,
            entity,
            entity_id,
            action,
        };
        if let Err(error) = AuditRepo::record(&pool, &entry).await {
            tracing::warn!(%error, entity, entity_id, "Failed to record audit entry");
        }
    });
}
