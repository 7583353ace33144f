//! Shared query parameter types for API handlers.

use fleetlog_core::types::DbId;
use serde::Deserialize;

/// Query parameters for the meter-reading list endpoint
/// (`?equipment_id=&latest=`).
///
/// `latest=true` switches the endpoint to the single-most-recent-reading
/// shape and requires `equipment_id`.
#[derive(Debug, Deserialize)]
pub struct MeterReadingQuery {
    pub equipment_id: Option<DbId>,
    #[serde(default)]
    pub latest: bool,
}
