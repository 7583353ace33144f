//! Repository for the `fuel_logs` table.

use fleetlog_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::fuel_log::{CreateFuelLog, FuelLog, UpdateFuelLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, equipment_id, supplier_id, fuel_date, liters, total_cost, \
    created_by, created_at, updated_at";

/// Provides CRUD operations for fuel logs.
pub struct FuelLogRepo;

impl FuelLogRepo {
    /// Insert a new fuel log, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateFuelLog,
        created_by: UserId,
    ) -> Result<FuelLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO fuel_logs
                (equipment_id, supplier_id, fuel_date, liters, total_cost, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FuelLog>(&query)
            .bind(input.equipment_id)
            .bind(input.supplier_id)
            .bind(input.fuel_date)
            .bind(input.liters)
            .bind(input.total_cost)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a fuel log by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FuelLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fuel_logs WHERE id = $1");
        sqlx::query_as::<_, FuelLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all fuel logs, most recent fuel date first.
    pub async fn list(pool: &PgPool) -> Result<Vec<FuelLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fuel_logs ORDER BY fuel_date DESC, id DESC");
        sqlx::query_as::<_, FuelLog>(&query).fetch_all(pool).await
    }

    /// Update a fuel log. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFuelLog,
    ) -> Result<Option<FuelLog>, sqlx::Error> {
        let query = format!(
            "UPDATE fuel_logs SET
                equipment_id = COALESCE($2, equipment_id),
                supplier_id = COALESCE($3, supplier_id),
                fuel_date = COALESCE($4, fuel_date),
                liters = COALESCE($5, liters),
                total_cost = COALESCE($6, total_cost),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FuelLog>(&query)
            .bind(id)
            .bind(input.equipment_id)
            .bind(input.supplier_id)
            .bind(input.fuel_date)
            .bind(input.liters)
            .bind(input.total_cost)
            .fetch_optional(pool)
            .await
    }
}
