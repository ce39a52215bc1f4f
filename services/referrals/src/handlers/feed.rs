//! Live referral change feed over SSE.
//!
//! Each connection gets its own broadcast receiver; when the client
//! disconnects the stream is dropped and the receiver with it.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use enlace_auth_types::identity::Identity;

use crate::domain::feed::FeedEvent;
use crate::handlers::referral::ReferralResponse;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum FeedEventPayload {
    Inserted { referral: ReferralResponse },
    Updated { referral: ReferralResponse },
    Deleted { id: Uuid },
}

impl From<FeedEvent> for FeedEventPayload {
    fn from(event: FeedEvent) -> Self {
        match event {
            FeedEvent::Inserted(referral) => FeedEventPayload::Inserted {
                referral: referral.into(),
            },
            FeedEvent::Updated(referral) => FeedEventPayload::Updated {
                referral: referral.into(),
            },
            FeedEvent::Deleted { id, .. } => FeedEventPayload::Deleted { id },
        }
    }
}

// ── GET /users/@me/referrals/events ──────────────────────────────────────────

pub async fn referral_events(
    identity: Identity,
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let owner = identity.user_id;
    let rx = state.feed_tx.subscribe();

    let stream = futures::stream::unfold(rx, move |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) if event.owner() == owner => {
                    let payload = FeedEventPayload::from(event);
                    match Event::default().json_data(&payload) {
                        Ok(sse_event) => return Some((Ok(sse_event), rx)),
                        Err(e) => {
                            tracing::warn!(error = %e, "failed to encode feed event");
                            continue;
                        }
                    }
                }
                Ok(_) => continue,
                // A slow consumer misses events; the client refetches the
                // list on reconnect anyway.
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "feed subscriber lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
