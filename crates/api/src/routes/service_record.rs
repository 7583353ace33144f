//! Route definitions for the `/services` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::service_record;
use crate::state::AppState;

/// Routes mounted at `/services`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(service_record::list).post(service_record::create))
        .route(
            "/{id}",
            get(service_record::get_by_id).patch(service_record::update),
        )
}
