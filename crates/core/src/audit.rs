//! Audit trail constants.
//!
//! Every successful create or update inserts one append-only audit entry
//! recording who changed which entity. The insert is fire-and-forget: it is
//! not required for correctness of the write it describes.

use serde::{Deserialize, Serialize};

/// Entity names as recorded in audit entries.
pub mod entities {
    pub const EQUIPMENT: &str = "equipment";
    pub const SUPPLIERS: &str = "suppliers";
    pub const SERVICE_TYPES: &str = "service_types";
    pub const SERVICE_RECORDS: &str = "service_records";
    pub const FUEL_LOGS: &str = "fuel_logs";
    pub const METER_READINGS: &str = "meter_readings";
}

/// Action recorded in an audit entry. Entities are never deleted, so there
/// is no delete action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
}

impl AuditAction {
    /// Return the action name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }

    /// Parse an action string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "create" => Some(Self::Create),
            "update" => Some(Self::Update),
            _ => None,
        }
    }

    /// All valid action values.
    pub const ALL: &'static [&'static str] = &["create", "update"];
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_round_trip() {
        for s in AuditAction::ALL {
            let action = AuditAction::parse(s).unwrap();
            assert_eq!(action.as_str(), *s);
        }
    }

    #[test]
    fn unknown_action_returns_none() {
        assert!(AuditAction::parse("delete").is_none());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", AuditAction::Create), "create");
    }
}
