//! Route definitions for the `/service-types` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::service_type;
use crate::state::AppState;

/// Routes mounted at `/service-types`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(service_type::list).post(service_type::create))
        .route(
            "/{id}",
            get(service_type::get_by_id).patch(service_type::update),
        )
}
