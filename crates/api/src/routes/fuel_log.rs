//! Route definitions for the `/fuel-logs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::fuel_log;
use crate::state::AppState;

/// Routes mounted at `/fuel-logs`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fuel_log::list).post(fuel_log::create))
        .route("/{id}", get(fuel_log::get_by_id).patch(fuel_log::update))
}
