//! Volunteer account domain types.

use serde::{Deserialize, Serialize};

/// Campaign role of a registered account.
///
/// Wire format: text column (`admin`, `coordinator`, `volunteer`,
/// `activist`). Self-registration always starts at `Volunteer`; the other
/// roles are assigned by campaign staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Activist,
    Volunteer,
    Coordinator,
    Admin,
}

impl UserRole {
    /// Text wire value as stored in the `role` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Activist => "activist",
            Self::Volunteer => "volunteer",
            Self::Coordinator => "coordinator",
            Self::Admin => "admin",
        }
    }

    /// Parse the text wire value. Returns `None` for unknown values.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "activist" => Some(Self::Activist),
            "volunteer" => Some(Self::Volunteer),
            "coordinator" => Some(Self::Coordinator),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    fn privilege(self) -> u8 {
        match self {
            Self::Activist => 0,
            Self::Volunteer => 1,
            Self::Coordinator => 2,
            Self::Admin => 3,
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_opt(s).ok_or(UnknownRole)
    }
}

/// Error returned when a role string does not name a known role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown role")]
pub struct UnknownRole;

impl PartialOrd for UserRole {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UserRole {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.privilege().cmp(&other.privilege())
    }
}
