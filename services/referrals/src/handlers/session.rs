use axum::{Json, extract::State, http::StatusCode};
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use serde::{Deserialize, Serialize};

use crate::error::ReferralServiceError;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::session::{LoginUseCase, LogoutUseCase};

// ── POST /sessions ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub identification: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub total_referrals: u64,
    pub access_token: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ReferralServiceError> {
    let uc = LoginUseCase {
        identity: state.identity_provider(),
        users: state.user_repo(),
        referrals: state.referral_repo(),
        email_domain: state.settings.email_domain.clone(),
    };
    let output = uc.execute(&body.identification, &body.password).await?;
    Ok(Json(LoginResponse {
        user: output.user.into(),
        total_referrals: output.total_referrals,
        access_token: output.session.access_token,
    }))
}

// ── DELETE /sessions ─────────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    TypedHeader(authorization): TypedHeader<Authorization<Bearer>>,
) -> Result<StatusCode, ReferralServiceError> {
    let uc = LogoutUseCase {
        identity: state.identity_provider(),
    };
    uc.execute(authorization.token()).await?;
    Ok(StatusCode::NO_CONTENT)
}
