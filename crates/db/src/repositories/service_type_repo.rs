//! Repository for the `service_types` table.

use fleetlog_core::types::DbId;
use sqlx::PgPool;

use crate::models::service_type::{CreateServiceType, ServiceType, UpdateServiceType};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, active, created_at, updated_at";

/// Provides CRUD operations for service types.
pub struct ServiceTypeRepo;

impl ServiceTypeRepo {
    /// Insert a new service type, returning the created row.
    ///
    /// If `active` is `None`, defaults to `true`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateServiceType,
    ) -> Result<ServiceType, sqlx::Error> {
        let query = format!(
            "INSERT INTO service_types (name, description, active)
             VALUES ($1, $2, COALESCE($3, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ServiceType>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    /// Find a service type by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ServiceType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM service_types WHERE id = $1");
        sqlx::query_as::<_, ServiceType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all service types ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<ServiceType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM service_types ORDER BY name");
        sqlx::query_as::<_, ServiceType>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a service type. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateServiceType,
    ) -> Result<Option<ServiceType>, sqlx::Error> {
        let query = format!(
            "UPDATE service_types SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                active = COALESCE($4, active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ServiceType>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.active)
            .fetch_optional(pool)
            .await
    }
}
