//! In-memory projection of a user's referral list, kept current by
//! store change events.
//!
//! Events may arrive out of order. The projection is idempotent-safe:
//! an UPDATE or DELETE for an id not present is a no-op, and an INSERT
//! for an id already present is ignored.

use uuid::Uuid;

use crate::domain::types::Referral;

/// A change to one user's referral set, scoped by `referred_by`.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    Inserted(Referral),
    Updated(Referral),
    Deleted { referred_by: Uuid, id: Uuid },
}

impl FeedEvent {
    /// Owner of the feed this event belongs to.
    pub fn owner(&self) -> Uuid {
        match self {
            Self::Inserted(r) | Self::Updated(r) => r.referred_by,
            Self::Deleted { referred_by, .. } => *referred_by,
        }
    }
}

/// Newest-first referral list for one owner.
#[derive(Debug, Default)]
pub struct ReferralFeed {
    items: Vec<Referral>,
}

impl ReferralFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from an initial newest-first fetch.
    pub fn from_rows(items: Vec<Referral>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Referral] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Apply one change event.
    pub fn apply(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Inserted(referral) => {
                if self.items.iter().all(|r| r.id != referral.id) {
                    self.items.insert(0, referral);
                }
            }
            FeedEvent::Updated(referral) => {
                if let Some(slot) = self.items.iter_mut().find(|r| r.id == referral.id) {
                    *slot = referral;
                }
            }
            FeedEvent::Deleted { id, .. } => {
                self.items.retain(|r| r.id != id);
            }
        }
    }
}
