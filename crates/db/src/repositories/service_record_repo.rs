//! Repository for the `service_records` table.

use fleetlog_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::service_record::{CreateServiceRecord, ServiceRecord, UpdateServiceRecord};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, equipment_id, service_type_id, supplier_id, service_date, \
    description, cost, created_by, created_at, updated_at";

/// Provides CRUD operations for service records.
pub struct ServiceRecordRepo;

impl ServiceRecordRepo {
    /// Insert a new service record, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateServiceRecord,
        created_by: UserId,
    ) -> Result<ServiceRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO service_records
                (equipment_id, service_type_id, supplier_id, service_date,
                 description, cost, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ServiceRecord>(&query)
            .bind(input.equipment_id)
            .bind(input.service_type_id)
            .bind(input.supplier_id)
            .bind(input.service_date)
            .bind(&input.description)
            .bind(input.cost)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a service record by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ServiceRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM service_records WHERE id = $1");
        sqlx::query_as::<_, ServiceRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all service records, most recent service date first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ServiceRecord>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM service_records ORDER BY service_date DESC, id DESC");
        sqlx::query_as::<_, ServiceRecord>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a service record. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateServiceRecord,
    ) -> Result<Option<ServiceRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE service_records SET
                equipment_id = COALESCE($2, equipment_id),
                service_type_id = COALESCE($3, service_type_id),
                supplier_id = COALESCE($4, supplier_id),
                service_date = COALESCE($5, service_date),
                description = COALESCE($6, description),
                cost = COALESCE($7, cost),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ServiceRecord>(&query)
            .bind(id)
            .bind(input.equipment_id)
            .bind(input.service_type_id)
            .bind(input.supplier_id)
            .bind(input.service_date)
            .bind(&input.description)
            .bind(input.cost)
            .fetch_optional(pool)
            .await
    }
}
