//! Handlers for the `/fuel-logs` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fleetlog_core::audit::{entities, AuditAction};
use fleetlog_core::error::CoreError;
use fleetlog_core::types::DbId;
use fleetlog_db::models::fuel_log::{CreateFuelLog, FuelLog, UpdateFuelLog};
use fleetlog_db::repositories::FuelLogRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{record_audit, require_non_negative};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/fuel-logs
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> AppResult<Json<Vec<FuelLog>>> {
    let logs = FuelLogRepo::list(&state.pool).await?;
    Ok(Json(logs))
}

/// POST /api/v1/fuel-logs
///
/// References to equipment and supplier are checked by the database; a
/// violated foreign key surfaces as 404.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateFuelLog>,
) -> AppResult<(StatusCode, Json<FuelLog>)> {
    require_non_negative("liters", input.liters)?;
    require_non_negative("total_cost", input.total_cost)?;

    let log = FuelLogRepo::create(&state.pool, &input, user.user_id).await?;
    record_audit(
        &state.pool,
        user.user_id,
        entities::FUEL_LOGS,
        log.id,
        AuditAction::Create,
    );
    Ok((StatusCode::CREATED, Json(log)))
}

/// GET /api/v1/fuel-logs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<FuelLog>> {
    let log = FuelLogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "FuelLog",
            id,
        }))?;
    Ok(Json(log))
}

/// PATCH /api/v1/fuel-logs/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFuelLog>,
) -> AppResult<Json<FuelLog>> {
    if let Some(liters) = input.liters {
        require_non_negative("liters", liters)?;
    }
    if let Some(total_cost) = input.total_cost {
        require_non_negative("total_cost", total_cost)?;
    }

    let log = FuelLogRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "FuelLog",
            id,
        }))?;
    record_audit(
        &state.pool,
        user.user_id,
        entities::FUEL_LOGS,
        log.id,
        AuditAction::Update,
    );
    Ok(Json(log))
}
