//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Methods that must run inside the
//! per-equipment write transaction take `&mut PgConnection` instead so the
//! caller can pass the transaction connection.

pub mod audit_repo;
pub mod equipment_repo;
pub mod fuel_log_repo;
pub mod meter_reading_repo;
pub mod service_record_repo;
pub mod service_type_repo;
pub mod supplier_repo;
pub mod user_repo;

pub use audit_repo::AuditRepo;
pub use equipment_repo::EquipmentRepo;
pub use fuel_log_repo::FuelLogRepo;
pub use meter_reading_repo::MeterReadingRepo;
pub use service_record_repo::ServiceRecordRepo;
pub use service_type_repo::ServiceTypeRepo;
pub use supplier_repo::SupplierRepo;
pub use user_repo::UserRepo;
