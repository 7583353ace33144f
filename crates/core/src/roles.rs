//! User roles as assigned in the local profile table.
//!
//! Credentials and sessions live in the external identity provider; the
//! profile row only carries the role and the active flag.

use serde::{Deserialize, Serialize};

/// Role of a fleetlog user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Operator,
    Manager,
}

impl UserRole {
    /// Return the role name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Operator => "operator",
            Self::Manager => "manager",
        }
    }

    /// Parse a role string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "operator" => Some(Self::Operator),
            "manager" => Some(Self::Manager),
            _ => None,
        }
    }

    /// All valid role values.
    pub const ALL: &'static [&'static str] = &["admin", "operator", "manager"];
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trip() {
        for s in UserRole::ALL {
            let role = UserRole::parse(s).unwrap();
            assert_eq!(role.as_str(), *s);
        }
    }

    #[test]
    fn unknown_role_returns_none() {
        assert!(UserRole::parse("superuser").is_none());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", UserRole::Operator), "operator");
    }
}
