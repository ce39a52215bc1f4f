//! Activity feed domain types.

use serde::{Deserialize, Serialize};

/// Kind of network-mutating action recorded in the activity log.
///
/// `NewReferral` is appended to the *referrer's* feed when someone
/// registers with their code; `AddReferral` when a user records a
/// referral themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    NewReferral,
    AddReferral,
    ProfileUpdate,
    StatusChange,
}

impl ActivityAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewReferral => "new_referral",
            Self::AddReferral => "add_referral",
            Self::ProfileUpdate => "profile_update",
            Self::StatusChange => "status_change",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "new_referral" => Some(Self::NewReferral),
            "add_referral" => Some(Self::AddReferral),
            "profile_update" => Some(Self::ProfileUpdate),
            "status_change" => Some(Self::StatusChange),
            _ => None,
        }
    }
}
