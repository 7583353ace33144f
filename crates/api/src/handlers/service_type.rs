//! Handlers for the `/service-types` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fleetlog_core::audit::{entities, AuditAction};
use fleetlog_core::error::CoreError;
use fleetlog_core::types::DbId;
use fleetlog_db::models::service_type::{CreateServiceType, ServiceType, UpdateServiceType};
use fleetlog_db::repositories::ServiceTypeRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{record_audit, require_non_empty};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/service-types
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<ServiceType>>> {
    let service_types = ServiceTypeRepo::list(&state.pool).await?;
    Ok(Json(service_types))
}

/// POST /api/v1/service-types
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateServiceType>,
) -> AppResult<(StatusCode, Json<ServiceType>)> {
    require_non_empty("name", &input.name)?;
    require_non_empty("description", &input.description)?;

    let service_type = ServiceTypeRepo::create(&state.pool, &input).await?;
    record_audit(
        &state.pool,
        user.user_id,
        entities::SERVICE_TYPES,
        service_type.id,
        AuditAction::Create,
    );
    Ok((StatusCode::CREATED, Json(service_type)))
}

/// GET /api/v1/service-types/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ServiceType>> {
    let service_type = ServiceTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ServiceType",
            id,
        }))?;
    Ok(Json(service_type))
}

/// PATCH /api/v1/service-types/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateServiceType>,
) -> AppResult<Json<ServiceType>> {
    if let Some(name) = &input.name {
        require_non_empty("name", name)?;
    }
    if let Some(description) = &input.description {
        require_non_empty("description", description)?;
    }

    let service_type = ServiceTypeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ServiceType",
            id,
        }))?;
    record_audit(
        &state.pool,
        user.user_id,
        entities::SERVICE_TYPES,
        service_type.id,
        AuditAction::Update,
    );
    Ok(Json(service_type))
}
