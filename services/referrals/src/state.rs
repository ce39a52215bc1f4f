use tokio::sync::broadcast;

use sea_orm::DatabaseConnection;

use crate::domain::feed::FeedEvent;
use crate::infra::db::{
    DbActivityLogRepository, DbNetworkQueries, DbReferralRepository, DbUserRepository,
};
use crate::infra::identity::HttpIdentityProvider;

/// Settings snapshot shared with handlers. A subset of the full config,
/// everything needed after startup.
#[derive(Clone)]
pub struct Settings {
    pub email_domain: String,
    pub referral_code_prefix: String,
    pub campaign_offset: chrono::FixedOffset,
    pub public_app_url: String,
}

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub identity: HttpIdentityProvider,
    pub settings: Settings,
    /// Fan-out of referral store changes to live feed subscribers.
    pub feed_tx: broadcast::Sender<FeedEvent>,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn referral_repo(&self) -> DbReferralRepository {
        DbReferralRepository {
            db: self.db.clone(),
        }
    }

    pub fn activity_repo(&self) -> DbActivityLogRepository {
        DbActivityLogRepository {
            db: self.db.clone(),
        }
    }

    pub fn network_queries(&self) -> DbNetworkQueries {
        DbNetworkQueries {
            db: self.db.clone(),
        }
    }

    pub fn identity_provider(&self) -> HttpIdentityProvider {
        self.identity.clone()
    }

    /// Publish a store change to live subscribers. Lossy when nobody
    /// listens, which is fine for a feed rebuilt on connect.
    pub fn publish(&self, event: FeedEvent) {
        let _ = self.feed_tx.send(event);
    }
}
