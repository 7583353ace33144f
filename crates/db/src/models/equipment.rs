//! Equipment entity model and DTOs.

use fleetlog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `equipment` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Equipment {
    pub id: DbId,
    pub code: String,
    pub description: String,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new piece of equipment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEquipment {
    pub code: String,
    pub description: String,
    /// Defaults to `true` if omitted.
    pub active: Option<bool>,
}

/// DTO for updating equipment. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEquipment {
    pub code: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}
