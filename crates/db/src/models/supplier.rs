//! Supplier entity model and DTOs.

use fleetlog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `suppliers` table.
///
/// `kind` is one of the [`fleetlog_core::supplier::SupplierKind`] values;
/// handlers validate the string before it reaches the repository.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Supplier {
    pub id: DbId,
    pub name: String,
    pub kind: String,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new supplier.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSupplier {
    pub name: String,
    pub kind: String,
    /// Defaults to `true` if omitted.
    pub active: Option<bool>,
}

/// DTO for updating a supplier. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSupplier {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub active: Option<bool>,
}
