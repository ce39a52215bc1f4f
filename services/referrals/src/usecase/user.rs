//! Profile reads and updates.

use uuid::Uuid;

use enlace_domain::activity::ActivityAction;

use crate::domain::repository::{ActivityLogRepository, ReferralRepository, UserRepository};
use crate::domain::types::{ProfilePatch, User};
use crate::error::ReferralServiceError;
use crate::usecase::activity::{NewActivity, RecordActivityUseCase};

pub struct ProfileView {
    pub user: User,
    pub total_referrals: u64,
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<U: UserRepository, R: ReferralRepository> {
    pub users: U,
    pub referrals: R,
}

impl<U: UserRepository, R: ReferralRepository> GetProfileUseCase<U, R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<ProfileView, ReferralServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ReferralServiceError::UserNotFound)?;
        let total_referrals = self.referrals.count_by_referrer(user.id).await?;
        Ok(ProfileView {
            user,
            total_referrals,
        })
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileUseCase<U: UserRepository, A: ActivityLogRepository> {
    pub users: U,
    pub activity: RecordActivityUseCase<A>,
}

impl<U: UserRepository, A: ActivityLogRepository> UpdateProfileUseCase<U, A> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        patch: ProfilePatch,
    ) -> Result<User, ReferralServiceError> {
        if patch.is_empty() {
            return Err(ReferralServiceError::MissingData);
        }
        // Existence first so a missing profile is a 404, not a silent
        // zero-row update.
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(ReferralServiceError::UserNotFound);
        }
        self.users.update_profile(user_id, &patch).await?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ReferralServiceError::UserNotFound)?;

        self.activity
            .execute_best_effort(NewActivity {
                user_id,
                action: ActivityAction::ProfileUpdate,
                entity_type: "user".into(),
                entity_id: Some(user_id),
                description: Some("Actualizaste tu perfil".into()),
                metadata: None,
            })
            .await;

        Ok(user)
    }
}
