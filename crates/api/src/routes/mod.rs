pub mod equipment;
pub mod fuel_log;
pub mod health;
pub mod meter_reading;
pub mod service_record;
pub mod service_type;
pub mod supplier;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy (all routes require a provider-issued Bearer token):
///
/// ```text
/// /equipment                       list, create
/// /equipment/{id}                  get, update
///
/// /suppliers                       list, create
/// /suppliers/{id}                  get, update
///
/// /service-types                   list, create
/// /service-types/{id}              get, update
///
/// /services                        list, create
/// /services/{id}                   get, update
///
/// /fuel-logs                       list, create
/// /fuel-logs/{id}                  get, update
///
/// /meter-readings                  list annotated (?equipment_id=),
///                                  latest (?equipment_id=&latest=true),
///                                  create
/// /meter-readings/{id}             update
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/equipment", equipment::router())
        .nest("/suppliers", supplier::router())
        .nest("/service-types", service_type::router())
        .nest("/services", service_record::router())
        .nest("/fuel-logs", fuel_log::router())
        .nest("/meter-readings", meter_reading::router())
}
