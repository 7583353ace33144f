//! Fuel log entity model and DTOs.

use chrono::NaiveDate;
use fleetlog_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `fuel_logs` table: one refueling of a piece of equipment.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FuelLog {
    pub id: DbId,
    pub equipment_id: DbId,
    pub supplier_id: DbId,
    pub fuel_date: NaiveDate,
    pub liters: f64,
    pub total_cost: f64,
    pub created_by: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a new fuel-up. `created_by` comes from the
/// authenticated user, not the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFuelLog {
    pub equipment_id: DbId,
    pub supplier_id: DbId,
    pub fuel_date: NaiveDate,
    pub liters: f64,
    pub total_cost: f64,
}

/// DTO for updating a fuel log. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFuelLog {
    pub equipment_id: Option<DbId>,
    pub supplier_id: Option<DbId>,
    pub fuel_date: Option<NaiveDate>,
    pub liters: Option<f64>,
    pub total_cost: Option<f64>,
}
