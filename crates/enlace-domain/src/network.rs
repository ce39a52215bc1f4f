//! Derived network views: tree nodes, rankings and dashboard stats.
//!
//! None of these are stored; they are recomputed per query by the
//! aggregator and serialized straight to the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One node of the referral tree rooted at a user.
///
/// `level` is the BFS depth (direct referrals are level 1); the root
/// itself is not part of the view. `children_count` is the number of
/// direct children of this node, not the transitive size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: Uuid,
    pub name: String,
    pub level: u32,
    pub parent_id: Uuid,
    pub children_count: u64,
    pub created_at: DateTime<Utc>,
}

/// One row of the global ranking.
///
/// `rank` is the 1-based position in the order sorted by
/// `total_referrals` descending; ties go to the account created earlier. `network_size` counts the full transitive
/// closure, `total_referrals` only the direct edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRanking {
    pub id: Uuid,
    pub name: String,
    pub referral_code: String,
    pub total_referrals: u64,
    pub network_size: u64,
    pub rank: u32,
}

/// Dashboard stat block for one user.
///
/// `user_rank` is 0 when the rank is unknown (ranking degraded or the
/// user not yet ranked).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_users: u64,
    pub total_referrals: u64,
    pub new_this_month: u64,
    pub user_rank: u32,
}
