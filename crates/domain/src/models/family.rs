//! Family membership domain models.

use serde::{Deserialize, Serialize};

/// Role of a user within a family.
///
/// Parents manage chores and verify completions; children complete the
/// chores assigned to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyRole {
    Parent,
    Child,
}

impl FamilyRole {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FamilyRole::Parent => "parent",
            FamilyRole::Child => "child",
        }
    }

    /// Parses from database string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "parent" => Some(FamilyRole::Parent),
            "child" => Some(FamilyRole::Child),
            _ => None,
        }
    }
}

impl std::fmt::Display for FamilyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_role_serialization() {
        assert_eq!(serde_json::to_string(&FamilyRole::Parent).unwrap(), "\"parent\"");
        assert_eq!(serde_json::to_string(&FamilyRole::Child).unwrap(), "\"child\"");
    }

    #[test]
    fn test_family_role_from_str() {
        assert_eq!(FamilyRole::from_str("parent"), Some(FamilyRole::Parent));
        assert_eq!(FamilyRole::from_str("child"), Some(FamilyRole::Child));
        assert_eq!(FamilyRole::from_str("admin"), None);
    }

    #[test]
    fn test_family_role_display() {
        assert_eq!(FamilyRole::Parent.to_string(), "parent");
        assert_eq!(FamilyRole::Child.to_string(), "child");
    }
}
