use axum::{Json, extract::State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use enlace_auth_types::identity::Identity;
use enlace_domain::referral::Zone;
use enlace_domain::user::UserRole;

use crate::domain::types::{ProfilePatch, User};
use crate::error::ReferralServiceError;
use crate::state::AppState;
use crate::usecase::activity::RecordActivityUseCase;
use crate::usecase::user::{GetProfileUseCase, UpdateProfileUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub identification: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub referral_code: String,
    pub parent_user_id: Option<Uuid>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub municipality: Option<String>,
    pub zone: Option<Zone>,
    pub neighborhood: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub occupation: Option<String>,
    #[serde(serialize_with = "enlace_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            identification: user.identification,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            referral_code: user.referral_code,
            parent_user_id: user.parent_user_id,
            email: user.email,
            phone: user.phone,
            department: user.department,
            municipality: user.municipality,
            zone: user.zone,
            neighborhood: user.neighborhood,
            birth_date: user.birth_date,
            occupation: user.occupation,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub total_referrals: u64,
    /// Shareable registration link carrying this user's code.
    pub share_url: String,
}

pub fn share_url(public_app_url: &str, referral_code: &str) -> String {
    format!("{public_app_url}/register?ref={referral_code}")
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, ReferralServiceError> {
    let uc = GetProfileUseCase {
        users: state.user_repo(),
        referrals: state.referral_repo(),
    };
    let view = uc.execute(identity.user_id).await?;
    let share_url = share_url(&state.settings.public_app_url, &view.user.referral_code);
    Ok(Json(ProfileResponse {
        user: view.user.into(),
        total_referrals: view.total_referrals,
        share_url,
    }))
}

// ── PATCH /users/@me ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub municipality: Option<String>,
    pub zone: Option<Zone>,
    pub neighborhood: Option<String>,
    pub occupation: Option<String>,
}

pub async fn update_me(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ReferralServiceError> {
    let patch = ProfilePatch {
        first_name: body.first_name,
        last_name: body.last_name,
        phone: body.phone,
        department: body.department,
        municipality: body.municipality,
        zone: body.zone,
        neighborhood: body.neighborhood,
        occupation: body.occupation,
    };
    let uc = UpdateProfileUseCase {
        users: state.user_repo(),
        activity: RecordActivityUseCase {
            activity: state.activity_repo(),
        },
    };
    let user = uc.execute(identity.user_id, patch).await?;
    Ok(Json(user.into()))
}
