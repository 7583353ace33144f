//! Repository for the `users` table.

use fleetlog_core::types::UserId;
use sqlx::PgPool;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, role, active, created_at, updated_at";

/// Read access to user profiles. Profiles are provisioned out of band
/// (identity provider webhook or operator SQL), so there is no create path
/// here.
pub struct UserRepo;

impl UserRepo {
    /// Find a user profile by the identity-provider subject id.
    pub async fn find_by_id(pool: &PgPool, id: UserId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
