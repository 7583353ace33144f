//! Service type entity model and DTOs.

use fleetlog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `service_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceType {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new service type.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateServiceType {
    pub name: String,
    pub description: String,
    /// Defaults to `true` if omitted.
    pub active: Option<bool>,
}

/// DTO for updating a service type. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateServiceType {
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}
