//! Repository for the `meter_readings` table.
//!
//! Chronological order within one equipment is (`reference_date`, `id`)
//! ascending; a freshly inserted row sorts after every existing row with the
//! same date. The neighbor queries below encode exactly that order so the
//! write validator compares a reading against its true chronological
//! neighbors.
//!
//! `neighbors`, `create`, and `update` take `&mut PgConnection` instead of
//! `&PgPool`: they run inside the transaction that holds the equipment row
//! lock (see `EquipmentRepo::lock`).

use chrono::NaiveDate;
use fleetlog_core::types::{DbId, UserId};
use sqlx::{PgConnection, PgPool};

use crate::models::meter_reading::{
    CreateMeterReading, MeterNeighbors, MeterReading, UpdateMeterReading,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, equipment_id, reference_date, value, note, created_by, \
    created_at, updated_at";

/// Provides persistence for hour-meter readings.
pub struct MeterReadingRepo;

impl MeterReadingRepo {
    /// Find a reading by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MeterReading>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM meter_readings WHERE id = $1");
        sqlx::query_as::<_, MeterReading>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all readings, most recent reference date first (display order).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<MeterReading>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM meter_readings ORDER BY reference_date DESC, id DESC");
        sqlx::query_as::<_, MeterReading>(&query)
            .fetch_all(pool)
            .await
    }

    /// List one equipment's readings, most recent reference date first.
    pub async fn list_by_equipment(
        pool: &PgPool,
        equipment_id: DbId,
    ) -> Result<Vec<MeterReading>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM meter_readings
             WHERE equipment_id = $1
             ORDER BY reference_date DESC, id DESC"
        );
        sqlx::query_as::<_, MeterReading>(&query)
            .bind(equipment_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch the single most recent reading for one equipment, or `None` if
    /// it has no readings yet.
    pub async fn find_latest_by_equipment(
        pool: &PgPool,
        equipment_id: DbId,
    ) -> Result<Option<MeterReading>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM meter_readings
             WHERE equipment_id = $1
             ORDER BY reference_date DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, MeterReading>(&query)
            .bind(equipment_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the chronological neighbor values around a prospective reading
    /// position.
    ///
    /// For an insert (`exclude_id` is `None`) the new row will sort after
    /// every existing same-date row, so same-date rows count as
    /// predecessors. For an update (`exclude_id` is the reading's own id)
    /// the position is the row's (`reference_date`, `id`) slot with itself
    /// excluded.
    pub async fn neighbors(
        conn: &mut PgConnection,
        equipment_id: DbId,
        reference_date: NaiveDate,
        exclude_id: Option<DbId>,
    ) -> Result<MeterNeighbors, sqlx::Error> {
        let previous: Option<f64> = match exclude_id {
            Some(own_id) => {
                sqlx::query_scalar(
                    "SELECT value FROM meter_readings
                     WHERE equipment_id = $1
                       AND (reference_date < $2 OR (reference_date = $2 AND id < $3))
                     ORDER BY reference_date DESC, id DESC
                     LIMIT 1",
                )
                .bind(equipment_id)
                .bind(reference_date)
                .bind(own_id)
                .fetch_optional(&mut *conn)
                .await?
            }
            None => {
                sqlx::query_scalar(
                    "SELECT value FROM meter_readings
                     WHERE equipment_id = $1 AND reference_date <= $2
                     ORDER BY reference_date DESC, id DESC
                     LIMIT 1",
                )
                .bind(equipment_id)
                .bind(reference_date)
                .fetch_optional(&mut *conn)
                .await?
            }
        };

        let next: Option<f64> = match exclude_id {
            Some(own_id) => {
                sqlx::query_scalar(
                    "SELECT value FROM meter_readings
                     WHERE equipment_id = $1
                       AND (reference_date > $2 OR (reference_date = $2 AND id > $3))
                     ORDER BY reference_date ASC, id ASC
                     LIMIT 1",
                )
                .bind(equipment_id)
                .bind(reference_date)
                .bind(own_id)
                .fetch_optional(&mut *conn)
                .await?
            }
            None => {
                sqlx::query_scalar(
                    "SELECT value FROM meter_readings
                     WHERE equipment_id = $1 AND reference_date > $2
                     ORDER BY reference_date ASC, id ASC
                     LIMIT 1",
                )
                .bind(equipment_id)
                .bind(reference_date)
                .fetch_optional(&mut *conn)
                .await?
            }
        };

        Ok(MeterNeighbors { previous, next })
    }

    /// Insert a new reading, returning the created row. Runs on the
    /// transaction connection holding the equipment lock.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateMeterReading,
        created_by: UserId,
    ) -> Result<MeterReading, sqlx::Error> {
        let query = format!(
            "INSERT INTO meter_readings
                (equipment_id, reference_date, value, note, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MeterReading>(&query)
            .bind(input.equipment_id)
            .bind(input.reference_date)
            .bind(input.value)
            .bind(&input.note)
            .bind(created_by)
            .fetch_one(conn)
            .await
    }

    /// Amend a reading. Only non-`None` fields in `input` are applied;
    /// `equipment_id` and `created_by` are immutable. Runs on the
    /// transaction connection holding the equipment lock.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateMeterReading,
    ) -> Result<Option<MeterReading>, sqlx::Error> {
        let query = format!(
            "UPDATE meter_readings SET
                reference_date = COALESCE($2, reference_date),
                value = COALESCE($3, value),
                note = COALESCE($4, note),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MeterReading>(&query)
            .bind(id)
            .bind(input.reference_date)
            .bind(input.value)
            .bind(&input.note)
            .fetch_optional(conn)
            .await
    }
}
