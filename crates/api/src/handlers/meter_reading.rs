//! Handlers for the `/meter-readings` resource.
//!
//! Reads return the annotated projection (previous value, hours worked)
//! computed by `fleetlog_core::meter`; nothing derived is ever stored.
//!
//! Writes run inside one transaction that first locks the equipment row,
//! then fetches the chronological neighbors, validates, and persists.
//! Concurrent writers to the same equipment serialize on the row lock, so
//! both can never pass validation against the same prior reading.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fleetlog_core::audit::{entities, AuditAction};
use fleetlog_core::error::CoreError;
use fleetlog_core::meter;
use fleetlog_core::types::DbId;
use fleetlog_db::models::meter_reading::{
    AnnotatedMeterReading, CreateMeterReading, MeterReading, UpdateMeterReading,
};
use fleetlog_db::repositories::{EquipmentRepo, MeterReadingRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{record_audit, require_non_negative};
use crate::middleware::auth::AuthUser;
use crate::query::MeterReadingQuery;
use crate::state::AppState;

/// GET /api/v1/meter-readings?equipment_id=&latest=
///
/// Two shapes:
/// - `latest=true` (requires `equipment_id`): the single most recent reading
///   for that equipment, or JSON `null`.
/// - otherwise: all readings (optionally filtered to one equipment), most
///   recent reference date first, each annotated with `previous_value` and
///   `hours_worked`.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<MeterReadingQuery>,
) -> AppResult<Response> {
    if params.latest {
        let equipment_id = params.equipment_id.ok_or_else(|| {
            AppError::BadRequest("latest=true requires equipment_id".to_string())
        })?;
        let latest = MeterReadingRepo::find_latest_by_equipment(&state.pool, equipment_id).await?;
        return Ok(Json(latest).into_response());
    }

    let readings = match params.equipment_id {
        Some(equipment_id) => {
            MeterReadingRepo::list_by_equipment(&state.pool, equipment_id).await?
        }
        None => MeterReadingRepo::list_all(&state.pool).await?,
    };

    Ok(Json(annotate_readings(readings)).into_response())
}

/// POST /api/v1/meter-readings
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateMeterReading>,
) -> AppResult<(StatusCode, Json<MeterReading>)> {
    require_non_negative("value", input.value)?;

    let mut tx = state.pool.begin().await?;

    EquipmentRepo::lock(&mut *tx, input.equipment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id: input.equipment_id,
        }))?;

    let neighbors =
        MeterReadingRepo::neighbors(&mut *tx, input.equipment_id, input.reference_date, None)
            .await?;
    meter::validate_reading(input.value, neighbors.previous, neighbors.next)?;

    let reading = MeterReadingRepo::create(&mut *tx, &input, user.user_id).await?;
    tx.commit().await?;

    record_audit(
        &state.pool,
        user.user_id,
        entities::METER_READINGS,
        reading.id,
        AuditAction::Create,
    );
    Ok((StatusCode::CREATED, Json(reading)))
}

/// PATCH /api/v1/meter-readings/{id}
///
/// Amends value, date, or note. When value or date changes the reading is
/// re-validated against the neighbors of its new position, excluding its own
/// row.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMeterReading>,
) -> AppResult<Json<MeterReading>> {
    if let Some(value) = input.value {
        require_non_negative("value", value)?;
    }

    let current = MeterReadingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MeterReading",
            id,
        }))?;

    let mut tx = state.pool.begin().await?;

    EquipmentRepo::lock(&mut *tx, current.equipment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id: current.equipment_id,
        }))?;

    if input.value.is_some() || input.reference_date.is_some() {
        let new_value = input.value.unwrap_or(current.value);
        let new_date = input.reference_date.unwrap_or(current.reference_date);
        let neighbors =
            MeterReadingRepo::neighbors(&mut *tx, current.equipment_id, new_date, Some(id)).await?;
        meter::validate_reading(new_value, neighbors.previous, neighbors.next)?;
    }

    let reading = MeterReadingRepo::update(&mut *tx, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MeterReading",
            id,
        }))?;
    tx.commit().await?;

    record_audit(
        &state.pool,
        user.user_id,
        entities::METER_READINGS,
        reading.id,
        AuditAction::Update,
    );
    Ok(Json(reading))
}

/// Attach the derived projection to fetched rows, preserving their order.
fn annotate_readings(readings: Vec<MeterReading>) -> Vec<AnnotatedMeterReading> {
    let points: Vec<_> = readings.iter().map(MeterReading::as_point).collect();
    let derived = meter::annotate(&points);
    readings
        .into_iter()
        .zip(derived)
        .map(|(reading, derivation)| AnnotatedMeterReading {
            reading,
            previous_value: derivation.previous_value,
            hours_worked: derivation.hours_worked,
        })
        .collect()
}
