//! Signup workflow.
//!
//! Order matters: the referral code (when given) is resolved and the
//! chain checked before anything is created, so an invalid code leaves
//! no identity and no profile behind. The identity account is created
//! before the profile; a profile insert failure after that point is an
//! orphaned identity and is logged as such.

use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use enlace_auth_types::session::Session;
use enlace_domain::activity::ActivityAction;
use enlace_domain::email::{is_valid_identification, synthetic_email};
use enlace_domain::referral::Zone;
use enlace_domain::user::UserRole;

use crate::domain::repository::{ActivityLogRepository, IdentityProvider, UserRepository};
use crate::domain::types::User;
use crate::error::ReferralServiceError;
use crate::usecase::activity::{NewActivity, RecordActivityUseCase};
use crate::usecase::code::GenerateReferralCodeUseCase;

const MAX_CREATE_ATTEMPTS: u32 = 5;

pub struct RegisterInput {
    pub identification: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub municipality: String,
    pub zone: Option<Zone>,
    pub neighborhood: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub occupation: Option<String>,
    /// Referrer's code; optional for organic signups.
    pub referral_code: Option<String>,
}

pub struct RegisterOutput {
    pub user: User,
    pub session: Session,
}

pub struct RegisterUserUseCase<U, A, I>
where
    U: UserRepository + Clone,
    A: ActivityLogRepository,
    I: IdentityProvider,
{
    pub users: U,
    pub activity: RecordActivityUseCase<A>,
    pub identity: I,
    pub email_domain: String,
    pub code_prefix: String,
}

impl<U, A, I> RegisterUserUseCase<U, A, I>
where
    U: UserRepository + Clone,
    A: ActivityLogRepository,
    I: IdentityProvider,
{
    pub async fn execute(
        &self,
        input: RegisterInput,
    ) -> Result<RegisterOutput, ReferralServiceError> {
        if !is_valid_identification(&input.identification) {
            return Err(ReferralServiceError::InvalidIdentification);
        }
        if input.first_name.trim().is_empty()
            || input.last_name.trim().is_empty()
            || input.municipality.trim().is_empty()
        {
            return Err(ReferralServiceError::MissingData);
        }

        let referrer = match input.referral_code.as_deref() {
            Some(code) => {
                let referrer = self
                    .users
                    .find_by_referral_code(code)
                    .await?
                    .ok_or(ReferralServiceError::ReferralCodeNotFound)?;
                self.ensure_acyclic(&referrer).await?;
                Some(referrer)
            }
            None => None,
        };

        let email = synthetic_email(&input.identification, &self.email_domain);
        let identity_id = self
            .identity
            .sign_up(&email, &input.identification)
            .await?;

        let generator = GenerateReferralCodeUseCase {
            users: self.users.clone(),
            prefix: self.code_prefix.clone(),
        };

        let now = Utc::now();
        let mut user = User {
            id: Uuid::now_v7(),
            identity_id: Some(identity_id),
            identification: input.identification.clone(),
            first_name: input.first_name,
            last_name: input.last_name,
            role: UserRole::Volunteer,
            referral_code: generator.execute(&input.identification).await?,
            parent_user_id: referrer.as_ref().map(|r| r.id),
            email: Some(email.clone()),
            phone: input.phone,
            department: input.department,
            municipality: Some(input.municipality),
            zone: input.zone,
            neighborhood: input.neighborhood,
            birth_date: input.birth_date,
            occupation: input.occupation,
            created_at: now,
            updated_at: now,
        };

        let mut attempts = 0;
        loop {
            match self.users.create(&user).await {
                Ok(()) => break,
                Err(ReferralServiceError::ReferralCodeTaken) => {
                    attempts += 1;
                    if attempts >= MAX_CREATE_ATTEMPTS {
                        return Err(ReferralServiceError::CodeGenerationExhausted);
                    }
                    user.referral_code = generator.execute(&input.identification).await?;
                }
                Err(ReferralServiceError::IdentificationTaken) => {
                    tracing::error!(
                        identity_id = %identity_id,
                        "identity created but identification already has a profile"
                    );
                    return Err(ReferralServiceError::IdentificationTaken);
                }
                Err(e) => {
                    tracing::error!(
                        identity_id = %identity_id,
                        error = %e,
                        "identity created but profile insert failed"
                    );
                    return Err(ReferralServiceError::ProfileCreationFailed);
                }
            }
        }

        if let Some(referrer) = &referrer {
            self.activity
                .execute_best_effort(NewActivity {
                    user_id: referrer.id,
                    action: ActivityAction::NewReferral,
                    entity_type: "user".into(),
                    entity_id: Some(user.id),
                    description: Some(format!("{} se unió a tu red", user.display_name())),
                    metadata: None,
                })
                .await;
        }

        let session = self.identity.sign_in(&email, &input.identification).await?;
        Ok(RegisterOutput { user, session })
    }

    /// Walk the referrer's ancestor chain; a repeated id means linking
    /// under this referrer would close a loop.
    async fn ensure_acyclic(&self, referrer: &User) -> Result<(), ReferralServiceError> {
        let mut seen = HashSet::new();
        seen.insert(referrer.id);
        let mut cursor = referrer.parent_user_id;
        while let Some(ancestor_id) = cursor {
            if !seen.insert(ancestor_id) {
                return Err(ReferralServiceError::ReferralChainLoop);
            }
            cursor = match self.users.find_by_id(ancestor_id).await? {
                Some(ancestor) => ancestor.parent_user_id,
                None => None,
            };
        }
        Ok(())
    }
}
