//! Session lifecycle against the external identity provider.

use enlace_auth_types::session::Session;
use enlace_domain::email::{is_valid_identification, synthetic_email};

use crate::domain::repository::{IdentityProvider, ReferralRepository, UserRepository};
use crate::domain::types::User;
use crate::error::ReferralServiceError;

pub struct LoginOutput {
    pub user: User,
    pub session: Session,
    pub total_referrals: u64,
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginUseCase<I: IdentityProvider, U: UserRepository, R: ReferralRepository> {
    pub identity: I,
    pub users: U,
    pub referrals: R,
    pub email_domain: String,
}

impl<I: IdentityProvider, U: UserRepository, R: ReferralRepository> LoginUseCase<I, U, R> {
    pub async fn execute(
        &self,
        identification: &str,
        password: &str,
    ) -> Result<LoginOutput, ReferralServiceError> {
        // A malformed identification can never match an account; answer
        // the same way as a bad password.
        if !is_valid_identification(identification) {
            return Err(ReferralServiceError::InvalidCredentials);
        }
        let email = synthetic_email(identification, &self.email_domain);
        let session = self.identity.sign_in(&email, password).await?;

        let user = self
            .users
            .find_by_identity_id(session.identity_id)
            .await?
            .ok_or(ReferralServiceError::UserNotFound)?;
        let total_referrals = self.referrals.count_by_referrer(user.id).await?;

        Ok(LoginOutput {
            user,
            session,
            total_referrals,
        })
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<I: IdentityProvider> {
    pub identity: I,
}

impl<I: IdentityProvider> LogoutUseCase<I> {
    pub async fn execute(&self, access_token: &str) -> Result<(), ReferralServiceError> {
        self.identity.sign_out(access_token).await
    }
}
