//! Hour-meter reading entity model and DTOs.

use chrono::NaiveDate;
use fleetlog_core::meter::MeterPoint;
use fleetlog_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `meter_readings` table. Raw values only; the derived
/// fields live in [`AnnotatedMeterReading`] and are computed per query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MeterReading {
    pub id: DbId,
    pub equipment_id: DbId,
    pub reference_date: NaiveDate,
    pub value: f64,
    pub note: Option<String>,
    pub created_by: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MeterReading {
    /// Project the fields the derivation engine works on.
    pub fn as_point(&self) -> MeterPoint {
        MeterPoint {
            id: self.id,
            equipment_id: self.equipment_id,
            reference_date: self.reference_date,
            value: self.value,
        }
    }
}

/// A reading with its read-time projection attached.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedMeterReading {
    #[serde(flatten)]
    pub reading: MeterReading,
    pub previous_value: Option<f64>,
    pub hours_worked: Option<f64>,
}

/// The chronological neighbor values around a prospective reading position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeterNeighbors {
    pub previous: Option<f64>,
    pub next: Option<f64>,
}

/// DTO for recording a new reading. `created_by` comes from the
/// authenticated user, not the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMeterReading {
    pub equipment_id: DbId,
    pub reference_date: NaiveDate,
    pub value: f64,
    pub note: Option<String>,
}

/// DTO for amending a reading. All fields are optional; `equipment_id` and
/// `created_by` are immutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMeterReading {
    pub reference_date: Option<NaiveDate>,
    pub value: Option<f64>,
    pub note: Option<String>,
}
