//! Route definitions for the `/meter-readings` resource.
//!
//! Readings are created and amended, never deleted.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::meter_reading;
use crate::state::AppState;

/// Routes mounted at `/meter-readings`.
///
/// ```text
/// GET    /        -> list (annotated; ?equipment_id= filter,
///                         ?equipment_id=&latest=true for the latest reading)
/// POST   /        -> create
/// PATCH  /{id}    -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(meter_reading::list).post(meter_reading::create))
        .route("/{id}", patch(meter_reading::update))
}
