//! Handlers for the `/equipment` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fleetlog_core::audit::{entities, AuditAction};
use fleetlog_core::error::CoreError;
use fleetlog_core::types::DbId;
use fleetlog_db::models::equipment::{CreateEquipment, Equipment, UpdateEquipment};
use fleetlog_db::repositories::EquipmentRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{record_audit, require_non_empty};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/equipment
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = EquipmentRepo::list(&state.pool).await?;
    Ok(Json(equipment))
}

/// POST /api/v1/equipment
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    require_non_empty("code", &input.code)?;
    require_non_empty("description", &input.description)?;

    let equipment = EquipmentRepo::create(&state.pool, &input).await?;
    record_audit(
        &state.pool,
        user.user_id,
        entities::EQUIPMENT,
        equipment.id,
        AuditAction::Create,
    );
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// GET /api/v1/equipment/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Equipment>> {
    let equipment = EquipmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id,
        }))?;
    Ok(Json(equipment))
}

/// PATCH /api/v1/equipment/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    if let Some(code) = &input.code {
        require_non_empty("code", code)?;
    }
    if let Some(description) = &input.description {
        require_non_empty("description", description)?;
    }

    let equipment = EquipmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id,
        }))?;
    record_audit(
        &state.pool,
        user.user_id,
        entities::EQUIPMENT,
        equipment.id,
        AuditAction::Update,
    );
    Ok(Json(equipment))
}
