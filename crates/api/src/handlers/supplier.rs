//! Handlers for the `/suppliers` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fleetlog_core::audit::{entities, AuditAction};
use fleetlog_core::error::CoreError;
use fleetlog_core::supplier::SupplierKind;
use fleetlog_core::types::DbId;
use fleetlog_db::models::supplier::{CreateSupplier, Supplier, UpdateSupplier};
use fleetlog_db::repositories::SupplierRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{record_audit, require_non_empty};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Reject supplier kinds outside the closed set.
fn require_known_kind(kind: &str) -> Result<(), AppError> {
    if SupplierKind::parse(kind).is_none() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown supplier kind '{}'. Must be one of: {}",
            kind,
            SupplierKind::ALL.join(", ")
        ))));
    }
    Ok(())
}

/// GET /api/v1/suppliers
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> AppResult<Json<Vec<Supplier>>> {
    let suppliers = SupplierRepo::list(&state.pool).await?;
    Ok(Json(suppliers))
}

/// POST /api/v1/suppliers
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateSupplier>,
) -> AppResult<(StatusCode, Json<Supplier>)> {
    require_non_empty("name", &input.name)?;
    require_known_kind(&input.kind)?;

    let supplier = SupplierRepo::create(&state.pool, &input).await?;
    record_audit(
        &state.pool,
        user.user_id,
        entities::SUPPLIERS,
        supplier.id,
        AuditAction::Create,
    );
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// GET /api/v1/suppliers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Supplier>> {
    let supplier = SupplierRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Supplier",
            id,
        }))?;
    Ok(Json(supplier))
}

/// PATCH /api/v1/suppliers/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSupplier>,
) -> AppResult<Json<Supplier>> {
    if let Some(name) = &input.name {
        require_non_empty("name", name)?;
    }
    if let Some(kind) = &input.kind {
        require_known_kind(kind)?;
    }

    let supplier = SupplierRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Supplier",
            id,
        }))?;
    record_audit(
        &state.pool,
        user.user_id,
        entities::SUPPLIERS,
        supplier.id,
        AuditAction::Update,
    );
    Ok(Json(supplier))
}
