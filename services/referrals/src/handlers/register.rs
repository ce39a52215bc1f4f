use axum::{Json, extract::Path, extract::State, http::StatusCode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use enlace_domain::referral::Zone;

use crate::error::ReferralServiceError;
use crate::handlers::user::{UserResponse, share_url};
use crate::state::AppState;
use crate::usecase::activity::RecordActivityUseCase;
use crate::usecase::code::ResolveReferralCodeUseCase;
use crate::usecase::register::{RegisterInput, RegisterUserUseCase};

// ── POST /register ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
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
    pub referral_code: Option<String>,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub access_token: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ReferralServiceError> {
    let uc = RegisterUserUseCase {
        users: state.user_repo(),
        activity: RecordActivityUseCase {
            activity: state.activity_repo(),
        },
        identity: state.identity_provider(),
        email_domain: state.settings.email_domain.clone(),
        code_prefix: state.settings.referral_code_prefix.clone(),
    };
    let output = uc
        .execute(RegisterInput {
            identification: body.identification,
            first_name: body.first_name,
            last_name: body.last_name,
            phone: body.phone,
            department: body.department,
            municipality: body.municipality,
            zone: body.zone,
            neighborhood: body.neighborhood,
            birth_date: body.birth_date,
            occupation: body.occupation,
            referral_code: body.referral_code,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: output.user.into(),
            access_token: output.session.access_token,
        }),
    ))
}

// ── GET /referral-codes/{code} ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct ReferralCodeResponse {
    pub referral_code: String,
    /// Display name of the user who owns the code.
    pub referrer_name: String,
    pub registration_url: String,
}

/// Public landing lookup: who invited me, and where do I sign up.
pub async fn resolve_referral_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ReferralCodeResponse>, ReferralServiceError> {
    let uc = ResolveReferralCodeUseCase {
        users: state.user_repo(),
    };
    let referrer = uc.execute(&code).await?;
    let registration_url = share_url(&state.settings.public_app_url, &referrer.referral_code);
    Ok(Json(ReferralCodeResponse {
        referral_code: referrer.referral_code.clone(),
        referrer_name: referrer.display_name(),
        registration_url,
    }))
}
