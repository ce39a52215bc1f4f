use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use enlace_core::health::{healthz, readyz};
use enlace_core::middleware::request_id_layer;

use crate::handlers::{
    feed::referral_events,
    referral::{create_referral, delete_referral, get_referrals, update_referral},
    register::{register, resolve_referral_code},
    reports::{get_activity, get_network, get_ranking, get_stats},
    session::{login, logout},
    user::{get_me, update_me},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Public
        .route("/register", post(register))
        .route("/referral-codes/{code}", get(resolve_referral_code))
        // Sessions
        .route("/sessions", post(login))
        .route("/sessions", delete(logout))
        // Profile
        .route("/users/@me", get(get_me))
        .route("/users/@me", patch(update_me))
        // Referrals
        .route("/users/@me/referrals", get(get_referrals))
        .route("/users/@me/referrals", post(create_referral))
        .route("/users/@me/referrals/{id}", patch(update_referral))
        .route("/users/@me/referrals/{id}", delete(delete_referral))
        .route("/users/@me/referrals/events", get(referral_events))
        // Reports
        .route("/users/@me/network", get(get_network))
        .route("/users/@me/stats", get(get_stats))
        .route("/users/@me/activity", get(get_activity))
        .route("/ranking", get(get_ranking))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
