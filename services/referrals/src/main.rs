use sea_orm::Database;
use tokio::sync::broadcast;
use tracing::info;

use enlace_referrals::config::ReferralsConfig;
use enlace_referrals::infra::identity::HttpIdentityProvider;
use enlace_referrals::router::build_router;
use enlace_referrals::state::{AppState, Settings};

#[tokio::main]
async fn main() {
    enlace_core::tracing::init_tracing();

    let config = ReferralsConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let identity =
        HttpIdentityProvider::new(&config.identity_url).expect("failed to build identity client");

    let (feed_tx, _) = broadcast::channel(256);

    let state = AppState {
        db,
        identity,
        settings: Settings {
            email_domain: config.email_domain.clone(),
            referral_code_prefix: config.referral_code_prefix.clone(),
            campaign_offset: config.campaign_offset(),
            public_app_url: config.public_app_url.clone(),
        },
        feed_tx,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("referrals service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
