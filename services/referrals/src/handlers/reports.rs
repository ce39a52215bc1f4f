//! Read-only dashboard endpoints: network view, ranking, stats,
//! activity feed.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use enlace_auth_types::identity::Identity;
use enlace_domain::activity::ActivityAction;
use enlace_domain::network::{NetworkNode, Stats, UserRanking};

use crate::domain::types::ActivityEntry;
use crate::error::ReferralServiceError;
use crate::state::AppState;
use crate::usecase::activity::ListActivityUseCase;
use crate::usecase::network::GetNetworkUseCase;
use crate::usecase::ranking::GetRankingUseCase;
use crate::usecase::stats::GetStatsUseCase;

const DEFAULT_RANKING_LIMIT: u64 = 20;
const DEFAULT_ACTIVITY_LIMIT: u64 = 10;

// ── GET /users/@me/network ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct NetworkResponse {
    pub nodes: Vec<NetworkNode>,
    pub degraded: bool,
}

pub async fn get_network(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<NetworkResponse>, ReferralServiceError> {
    let uc = GetNetworkUseCase {
        network: state.network_queries(),
    };
    let view = uc.execute(identity.user_id).await?;
    Ok(Json(NetworkResponse {
        nodes: view.nodes,
        degraded: view.degraded,
    }))
}

// ── GET /ranking ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct LimitQuery {
    pub limit: Option<u64>,
}

#[derive(Serialize)]
pub struct RankingResponse {
    pub entries: Vec<UserRanking>,
    pub degraded: bool,
}

pub async fn get_ranking(
    _identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<RankingResponse>, ReferralServiceError> {
    let uc = GetRankingUseCase {
        network: state.network_queries(),
        users: state.user_repo(),
    };
    let view = uc
        .execute(query.limit.unwrap_or(DEFAULT_RANKING_LIMIT))
        .await?;
    Ok(Json(RankingResponse {
        entries: view.entries,
        degraded: view.degraded,
    }))
}

// ── GET /users/@me/stats ─────────────────────────────────────────────────────

pub async fn get_stats(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Stats>, ReferralServiceError> {
    let uc = GetStatsUseCase {
        users: state.user_repo(),
        referrals: state.referral_repo(),
        network: state.network_queries(),
        campaign_offset: state.settings.campaign_offset,
    };
    let stats = uc.execute(identity.user_id).await?;
    Ok(Json(stats))
}

// ── GET /users/@me/activity ──────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ActivityResponse {
    pub id: Uuid,
    pub action: ActivityAction,
    pub entity_type: String,
    pub entity_id: Option<Uuid>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
    #[serde(serialize_with = "enlace_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ActivityEntry> for ActivityResponse {
    fn from(entry: ActivityEntry) -> Self {
        ActivityResponse {
            id: entry.id,
            action: entry.action,
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            description: entry.description,
            metadata: entry.metadata,
            created_at: entry.created_at,
        }
    }
}

pub async fn get_activity(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<ActivityResponse>>, ReferralServiceError> {
    let uc = ListActivityUseCase {
        activity: state.activity_repo(),
    };
    let entries = uc
        .execute(
            identity.user_id,
            query.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT),
        )
        .await?;
    Ok(Json(entries.into_iter().map(ActivityResponse::from).collect()))
}
