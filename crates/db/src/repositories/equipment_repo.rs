//! Repository for the `equipment` table.

use fleetlog_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::equipment::{CreateEquipment, Equipment, UpdateEquipment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, description, active, created_at, updated_at";

/// Provides CRUD operations for equipment.
pub struct EquipmentRepo;

impl EquipmentRepo {
    /// Insert a new piece of equipment, returning the created row.
    ///
    /// If `active` is `None`, defaults to `true`.
    pub async fn create(pool: &PgPool, input: &CreateEquipment) -> Result<Equipment, sqlx::Error> {
        let query = format!(
            "INSERT INTO equipment (code, description, active)
             VALUES ($1, $2, COALESCE($3, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(&input.code)
            .bind(&input.description)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    /// Find equipment by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment WHERE id = $1");
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all equipment ordered by code.
    pub async fn list(pool: &PgPool) -> Result<Vec<Equipment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment ORDER BY code");
        sqlx::query_as::<_, Equipment>(&query).fetch_all(pool).await
    }

    /// Update equipment. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEquipment,
    ) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!(
            "UPDATE equipment SET
                code = COALESCE($2, code),
                description = COALESCE($3, description),
                active = COALESCE($4, active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.description)
            .bind(input.active)
            .fetch_optional(pool)
            .await
    }

    /// Take a row lock on one equipment row for the rest of the current
    /// transaction. Returns `None` if the equipment does not exist.
    ///
    /// Meter-reading writes lock the equipment row first so the neighbor
    /// check and the insert/update run serialized per equipment.
    pub async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM equipment WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await
    }
}
