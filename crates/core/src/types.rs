/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// User identifiers are UUIDs issued by the external identity provider
/// (the token `sub` claim), not local serials.
pub type UserId = uuid::Uuid;
