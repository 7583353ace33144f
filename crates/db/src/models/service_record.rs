//! Service record entity model and DTOs.

use chrono::NaiveDate;
use fleetlog_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `service_records` table: one maintenance or supply job
/// performed on a piece of equipment.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceRecord {
    pub id: DbId,
    pub equipment_id: DbId,
    pub service_type_id: DbId,
    pub supplier_id: Option<DbId>,
    pub service_date: NaiveDate,
    pub description: String,
    pub cost: f64,
    pub created_by: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a new service. `created_by` comes from the
/// authenticated user, not the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateServiceRecord {
    pub equipment_id: DbId,
    pub service_type_id: DbId,
    pub supplier_id: Option<DbId>,
    pub service_date: NaiveDate,
    pub description: String,
    pub cost: f64,
}

/// DTO for updating a service record. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateServiceRecord {
    pub equipment_id: Option<DbId>,
    pub service_type_id: Option<DbId>,
    pub supplier_id: Option<DbId>,
    pub service_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub cost: Option<f64>,
}
