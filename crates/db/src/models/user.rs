//! User profile model.
//!
//! Credentials and sessions live in the external identity provider; this
//! table only maps provider subjects to a display name, role, and active
//! flag. There are no create/update DTOs: profiles are provisioned out of
//! band.

use fleetlog_core::types::{Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub role: String,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
