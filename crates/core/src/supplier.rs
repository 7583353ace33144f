//! Supplier categories.

use serde::{Deserialize, Serialize};

/// What a supplier provides. Fuel suppliers appear in fuel logs; maintenance
/// and supplies vendors appear in service records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplierKind {
    Fuel,
    Maintenance,
    Supplies,
}

impl SupplierKind {
    /// Return the kind name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fuel => "fuel",
            Self::Maintenance => "maintenance",
            Self::Supplies => "supplies",
        }
    }

    /// Parse a kind string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "fuel" => Some(Self::Fuel),
            "maintenance" => Some(Self::Maintenance),
            "supplies" => Some(Self::Supplies),
            _ => None,
        }
    }

    /// All valid kind values.
    pub const ALL: &'static [&'static str] = &["fuel", "maintenance", "supplies"];
}

impl std::fmt::Display for SupplierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trip() {
        for s in SupplierKind::ALL {
            let kind = SupplierKind::parse(s).unwrap();
            assert_eq!(kind.as_str(), *s);
        }
    }

    #[test]
    fn unknown_kind_returns_none() {
        assert!(SupplierKind::parse("logistics").is_none());
    }
}
