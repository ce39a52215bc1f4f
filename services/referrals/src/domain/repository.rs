#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use enlace_auth_types::session::Session;
use enlace_domain::pagination::PageRequest;

use crate::domain::types::{
    ActivityEntry, NetworkChild, ProfilePatch, RankingRow, Referral, ReferralPatch, User,
};
use crate::error::ReferralServiceError;

/// Repository for volunteer profiles.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ReferralServiceError>;
    async fn find_by_identity_id(
        &self,
        identity_id: Uuid,
    ) -> Result<Option<User>, ReferralServiceError>;
    async fn find_by_referral_code(
        &self,
        code: &str,
    ) -> Result<Option<User>, ReferralServiceError>;
    async fn referral_code_exists(&self, code: &str) -> Result<bool, ReferralServiceError>;
    /// Insert a profile. Unique violations surface as
    /// `IdentificationTaken` / `ReferralCodeTaken`.
    async fn create(&self, user: &User) -> Result<(), ReferralServiceError>;
    async fn update_profile(
        &self,
        id: Uuid,
        patch: &ProfilePatch,
    ) -> Result<(), ReferralServiceError>;
    async fn count(&self) -> Result<u64, ReferralServiceError>;
    /// Plain listing used by the degraded ranking fallback.
    async fn list_basic(&self, limit: u64) -> Result<Vec<User>, ReferralServiceError>;
}

/// Repository for referral rows. All reads and mutations except
/// `find_by_identification` are scoped to the owning user.
pub trait ReferralRepository: Send + Sync {
    async fn find_by_identification(
        &self,
        identification: &str,
    ) -> Result<Option<Referral>, ReferralServiceError>;
    /// Insert a referral. A duplicate identification surfaces as
    /// `ReferralExists`.
    async fn create(&self, referral: &Referral) -> Result<(), ReferralServiceError>;
    /// Update an owned referral; `None` when no row matches (wrong owner
    /// counts as missing). Returns the refreshed row.
    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: &ReferralPatch,
    ) -> Result<Option<Referral>, ReferralServiceError>;
    /// Delete an owned referral. Returns `true` if a row was deleted.
    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, ReferralServiceError>;
    /// Newest-first page of the owner's referrals plus the exact total.
    async fn list_by_referrer(
        &self,
        owner: Uuid,
        page: PageRequest,
    ) -> Result<(Vec<Referral>, u64), ReferralServiceError>;
    async fn count_by_referrer(&self, owner: Uuid) -> Result<u64, ReferralServiceError>;
    async fn count_by_referrer_since(
        &self,
        owner: Uuid,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, ReferralServiceError>;
}

/// Append-only activity log.
pub trait ActivityLogRepository: Send + Sync {
    async fn append(&self, entry: &ActivityEntry) -> Result<(), ReferralServiceError>;
    /// Newest-first feed for one owner, bounded by `limit`.
    async fn list_recent(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<ActivityEntry>, ReferralServiceError>;
}

/// Traversal and aggregate queries over the referral graph.
pub trait NetworkQueries: Send + Sync {
    /// Direct children of a user node, ordered by `created_at` ascending.
    async fn children_of(&self, node: Uuid) -> Result<Vec<NetworkChild>, ReferralServiceError>;
    /// Whole-graph ranking aggregate: direct counts plus transitive
    /// network sizes for every user, in a single statement.
    async fn referral_counts(&self) -> Result<Vec<RankingRow>, ReferralServiceError>;
}

/// Port to the external identity provider.
pub trait IdentityProvider: Send + Sync {
    /// Create an identity. Returns the provider-side account id.
    async fn sign_up(&self, email: &str, secret: &str) -> Result<Uuid, ReferralServiceError>;
    /// Authenticate and obtain a session.
    async fn sign_in(&self, email: &str, secret: &str) -> Result<Session, ReferralServiceError>;
    async fn sign_out(&self, access_token: &str) -> Result<(), ReferralServiceError>;
}
