//! Service-local domain entities.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use enlace_domain::activity::ActivityAction;
use enlace_domain::referral::{Gender, ReferralStatus, Zone};
use enlace_domain::user::UserRole;

/// A registered volunteer profile.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    /// Account id at the external identity provider, once created.
    pub identity_id: Option<Uuid>,
    pub identification: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    /// Immutable once issued.
    pub referral_code: String,
    /// The user whose code was used at signup. The chain is acyclic.
    pub parent_user_id: Option<Uuid>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub municipality: Option<String>,
    pub zone: Option<Zone>,
    pub neighborhood: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub occupation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A person recruited by a user; becomes linked via `user_id` if they
/// later register themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Referral {
    pub id: Uuid,
    pub identification: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub municipality: String,
    pub zone: Option<Zone>,
    pub neighborhood: Option<String>,
    pub occupation: Option<String>,
    pub status: ReferralStatus,
    /// Owning user. Row-level ownership scope for all referral queries.
    pub referred_by: Uuid,
    /// Weak back-link to the referral's own account, if registered.
    pub user_id: Option<Uuid>,
    pub terms_accepted: bool,
    pub privacy_accepted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Referral {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One append-only activity feed row.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: ActivityAction,
    pub entity_type: String,
    pub entity_id: Option<Uuid>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// A direct child edge of the referral tree, as returned by the
/// traversal primitive. `linked_user_id` continues the traversal when
/// the referral has registered their own account.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkChild {
    pub id: Uuid,
    pub name: String,
    pub linked_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// One row of the whole-graph ranking aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingRow {
    pub user_id: Uuid,
    pub name: String,
    pub referral_code: String,
    pub total_referrals: u64,
    pub network_size: u64,
    /// Tie-break: earlier accounts win the better rank.
    pub created_at: DateTime<Utc>,
}

/// Partial update of a user profile. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub municipality: Option<String>,
    pub zone: Option<Zone>,
    pub neighborhood: Option<String>,
    pub occupation: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.department.is_none()
            && self.municipality.is_none()
            && self.zone.is_none()
            && self.neighborhood.is_none()
            && self.occupation.is_none()
    }
}

/// Partial update of an owned referral. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferralPatch {
    pub status: Option<ReferralStatus>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub municipality: Option<String>,
    pub zone: Option<Zone>,
    pub neighborhood: Option<String>,
    pub occupation: Option<String>,
}

impl ReferralPatch {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.municipality.is_none()
            && self.zone.is_none()
            && self.neighborhood.is_none()
            && self.occupation.is_none()
    }
}
