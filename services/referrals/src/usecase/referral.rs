//! Referral management: add, list, update, delete. Every operation is
//! scoped to the authenticated owner.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use enlace_domain::activity::ActivityAction;
use enlace_domain::email::is_valid_identification;
use enlace_domain::pagination::PageRequest;
use enlace_domain::referral::{Gender, ReferralStatus, Zone};

use crate::domain::repository::{ActivityLogRepository, ReferralRepository};
use crate::domain::types::{Referral, ReferralPatch};
use crate::error::ReferralServiceError;
use crate::usecase::activity::{NewActivity, RecordActivityUseCase};

pub struct AddReferralInput {
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
    pub terms_accepted: bool,
    pub privacy_accepted: bool,
}

// ── AddReferral ──────────────────────────────────────────────────────────────

pub struct AddReferralUseCase<R: ReferralRepository, A: ActivityLogRepository> {
    pub referrals: R,
    pub activity: RecordActivityUseCase<A>,
}

impl<R: ReferralRepository, A: ActivityLogRepository> AddReferralUseCase<R, A> {
    pub async fn execute(
        &self,
        owner: Uuid,
        input: AddReferralInput,
    ) -> Result<Referral, ReferralServiceError> {
        if !is_valid_identification(&input.identification) {
            return Err(ReferralServiceError::InvalidIdentification);
        }
        if input.first_name.trim().is_empty()
            || input.last_name.trim().is_empty()
            || input.municipality.trim().is_empty()
        {
            return Err(ReferralServiceError::MissingData);
        }
        if !input.terms_accepted || !input.privacy_accepted {
            return Err(ReferralServiceError::ConsentRequired);
        }
        // Uniqueness is campaign-wide, not per owner: a person can be
        // recruited once.
        if self
            .referrals
            .find_by_identification(&input.identification)
            .await?
            .is_some()
        {
            return Err(ReferralServiceError::ReferralExists);
        }

        let now = Utc::now();
        let referral = Referral {
            id: Uuid::now_v7(),
            identification: input.identification,
            first_name: input.first_name,
            last_name: input.last_name,
            gender: input.gender,
            birth_date: input.birth_date,
            phone: input.phone,
            email: input.email,
            department: input.department,
            municipality: input.municipality,
            zone: input.zone,
            neighborhood: input.neighborhood,
            occupation: input.occupation,
            status: ReferralStatus::Pending,
            referred_by: owner,
            user_id: None,
            terms_accepted: input.terms_accepted,
            privacy_accepted: input.privacy_accepted,
            created_at: now,
            updated_at: now,
        };
        self.referrals.create(&referral).await?;

        self.activity
            .execute_best_effort(NewActivity {
                user_id: owner,
                action: ActivityAction::AddReferral,
                entity_type: "referral".into(),
                entity_id: Some(referral.id),
                description: Some(format!("Registraste a {}", referral.display_name())),
                metadata: None,
            })
            .await;

        Ok(referral)
    }
}

// ── ListReferrals ────────────────────────────────────────────────────────────

pub struct ListReferralsUseCase<R: ReferralRepository> {
    pub referrals: R,
}

impl<R: ReferralRepository> ListReferralsUseCase<R> {
    pub async fn execute(
        &self,
        owner: Uuid,
        page: PageRequest,
    ) -> Result<(Vec<Referral>, u64), ReferralServiceError> {
        self.referrals.list_by_referrer(owner, page.clamped()).await
    }
}

// ── UpdateReferral ───────────────────────────────────────────────────────────

pub struct UpdateReferralUseCase<R: ReferralRepository, A: ActivityLogRepository> {
    pub referrals: R,
    pub activity: RecordActivityUseCase<A>,
}

impl<R: ReferralRepository, A: ActivityLogRepository> UpdateReferralUseCase<R, A> {
    pub async fn execute(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: ReferralPatch,
    ) -> Result<Referral, ReferralServiceError> {
        if patch.is_empty() {
            return Err(ReferralServiceError::MissingData);
        }
        let status_changed = patch.status.is_some();
        let referral = self
            .referrals
            .update(owner, id, &patch)
            .await?
            .ok_or(ReferralServiceError::ReferralNotFound)?;

        if status_changed {
            self.activity
                .execute_best_effort(NewActivity {
                    user_id: owner,
                    action: ActivityAction::StatusChange,
                    entity_type: "referral".into(),
                    entity_id: Some(referral.id),
                    description: Some(format!(
                        "Actualizaste el estado de {}",
                        referral.display_name()
                    )),
                    metadata: None,
                })
                .await;
        }
        Ok(referral)
    }
}

// ── DeleteReferral ───────────────────────────────────────────────────────────

pub struct DeleteReferralUseCase<R: ReferralRepository> {
    pub referrals: R,
}

impl<R: ReferralRepository> DeleteReferralUseCase<R> {
    pub async fn execute(&self, owner: Uuid, id: Uuid) -> Result<(), ReferralServiceError> {
        if self.referrals.delete(owner, id).await? {
            Ok(())
        } else {
            Err(ReferralServiceError::ReferralNotFound)
        }
    }
}
