//! Entity model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod audit;
pub mod equipment;
pub mod fuel_log;
pub mod meter_reading;
pub mod service_record;
pub mod service_type;
pub mod supplier;
pub mod user;
