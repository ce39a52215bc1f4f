use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use enlace_auth_types::identity::Identity;
use enlace_domain::pagination::PageRequest;
use enlace_domain::referral::{Gender, ReferralStatus, Zone};

use crate::domain::feed::FeedEvent;
use crate::domain::types::{Referral, ReferralPatch};
use crate::error::ReferralServiceError;
use crate::state::AppState;
use crate::usecase::activity::RecordActivityUseCase;
use crate::usecase::referral::{
    AddReferralInput, AddReferralUseCase, DeleteReferralUseCase, ListReferralsUseCase,
    UpdateReferralUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ReferralResponse {
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
    pub user_id: Option<Uuid>,
    #[serde(serialize_with = "enlace_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Referral> for ReferralResponse {
    fn from(referral: Referral) -> Self {
        ReferralResponse {
            id: referral.id,
            identification: referral.identification,
            first_name: referral.first_name,
            last_name: referral.last_name,
            gender: referral.gender,
            birth_date: referral.birth_date,
            phone: referral.phone,
            email: referral.email,
            department: referral.department,
            municipality: referral.municipality,
            zone: referral.zone,
            neighborhood: referral.neighborhood,
            occupation: referral.occupation,
            status: referral.status,
            user_id: referral.user_id,
            created_at: referral.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct ReferralListResponse {
    pub items: Vec<ReferralResponse>,
    pub total: u64,
}

// ── GET /users/@me/referrals ─────────────────────────────────────────────────

pub async fn get_referrals(
    identity: Identity,
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<Json<ReferralListResponse>, ReferralServiceError> {
    let page: PageRequest = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| ReferralServiceError::MissingData)?
        .unwrap_or_default();

    let uc = ListReferralsUseCase {
        referrals: state.referral_repo(),
    };
    let (items, total) = uc.execute(identity.user_id, page).await?;
    Ok(Json(ReferralListResponse {
        items: items.into_iter().map(ReferralResponse::from).collect(),
        total,
    }))
}

// ── POST /users/@me/referrals ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateReferralRequest {
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
    #[serde(default)]
    pub terms_accepted: bool,
    #[serde(default)]
    pub privacy_accepted: bool,
}

pub async fn create_referral(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateReferralRequest>,
) -> Result<(StatusCode, Json<ReferralResponse>), ReferralServiceError> {
    let uc = AddReferralUseCase {
        referrals: state.referral_repo(),
        activity: RecordActivityUseCase {
            activity: state.activity_repo(),
        },
    };
    let referral = uc
        .execute(
            identity.user_id,
            AddReferralInput {
                identification: body.identification,
                first_name: body.first_name,
                last_name: body.last_name,
                gender: body.gender,
                birth_date: body.birth_date,
                phone: body.phone,
                email: body.email,
                department: body.department,
                municipality: body.municipality,
                zone: body.zone,
                neighborhood: body.neighborhood,
                occupation: body.occupation,
                terms_accepted: body.terms_accepted,
                privacy_accepted: body.privacy_accepted,
            },
        )
        .await?;
    state.publish(FeedEvent::Inserted(referral.clone()));
    Ok((StatusCode::CREATED, Json(referral.into())))
}

// ── PATCH /users/@me/referrals/{id} ──────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UpdateReferralRequest {
    pub status: Option<ReferralStatus>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub municipality: Option<String>,
    pub zone: Option<Zone>,
    pub neighborhood: Option<String>,
    pub occupation: Option<String>,
}

pub async fn update_referral(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateReferralRequest>,
) -> Result<Json<ReferralResponse>, ReferralServiceError> {
    let patch = ReferralPatch {
        status: body.status,
        phone: body.phone,
        email: body.email,
        municipality: body.municipality,
        zone: body.zone,
        neighborhood: body.neighborhood,
        occupation: body.occupation,
    };
    let uc = UpdateReferralUseCase {
        referrals: state.referral_repo(),
        activity: RecordActivityUseCase {
            activity: state.activity_repo(),
        },
    };
    let referral = uc.execute(identity.user_id, id, patch).await?;
    state.publish(FeedEvent::Updated(referral.clone()));
    Ok(Json(referral.into()))
}

// ── DELETE /users/@me/referrals/{id} ─────────────────────────────────────────

pub async fn delete_referral(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ReferralServiceError> {
    let uc = DeleteReferralUseCase {
        referrals: state.referral_repo(),
    };
    uc.execute(identity.user_id, id).await?;
    state.publish(FeedEvent::Deleted {
        referred_by: identity.user_id,
        id,
    });
    Ok(StatusCode::NO_CONTENT)
}
