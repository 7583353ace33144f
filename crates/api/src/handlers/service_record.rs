//! Handlers for the `/services` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fleetlog_core::audit::{entities, AuditAction};
use fleetlog_core::error::CoreError;
use fleetlog_core::types::DbId;
use fleetlog_db::models::service_record::{
    CreateServiceRecord, ServiceRecord, UpdateServiceRecord,
};
use fleetlog_db::repositories::ServiceRecordRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{record_audit, require_non_empty, require_non_negative};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/services
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<ServiceRecord>>> {
    let records = ServiceRecordRepo::list(&state.pool).await?;
    Ok(Json(records))
}

/// POST /api/v1/services
///
/// References to equipment, service type, and supplier are checked by the
/// database; a violated foreign key surfaces as 404.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateServiceRecord>,
) -> AppResult<(StatusCode, Json<ServiceRecord>)> {
    require_non_empty("description", &input.description)?;
    require_non_negative("cost", input.cost)?;

    let record = ServiceRecordRepo::create(&state.pool, &input, user.user_id).await?;
    record_audit(
        &state.pool,
        user.user_id,
        entities::SERVICE_RECORDS,
        record.id,
        AuditAction::Create,
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/services/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ServiceRecord>> {
    let record = ServiceRecordRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ServiceRecord",
            id,
        }))?;
    Ok(Json(record))
}

/// PATCH /api/v1/services/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateServiceRecord>,
) -> AppResult<Json<ServiceRecord>> {
    if let Some(description) = &input.description {
        require_non_empty("description", description)?;
    }
    if let Some(cost) = input.cost {
        require_non_negative("cost", cost)?;
    }

    let record = ServiceRecordRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ServiceRecord",
            id,
        }))?;
    record_audit(
        &state.pool,
        user.user_id,
        entities::SERVICE_RECORDS,
        record.id,
        AuditAction::Update,
    );
    Ok(Json(record))
}
