//! Campaign-wide ranking.
//!
//! Ordering is total direct referrals descending, with earlier sign-up
//! winning ties. Ranks are assigned from the sorted order, so equal
//! totals still get distinct positions.

use enlace_domain::network::UserRanking;

use crate::domain::repository::{NetworkQueries, UserRepository};
use crate::domain::types::RankingRow;
use crate::error::ReferralServiceError;

#[derive(Debug)]
pub struct RankingView {
    pub entries: Vec<UserRanking>,
    pub degraded: bool,
}

/// Sort aggregate rows and assign 1-based ranks.
pub fn ranked_entries(mut rows: Vec<RankingRow>) -> Vec<UserRanking> {
    rows.sort_by(|a, b| {
        b.total_referrals
            .cmp(&a.total_referrals)
            .then(a.created_at.cmp(&b.created_at))
    });
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| UserRanking {
            id: row.user_id,
            name: row.name,
            referral_code: row.referral_code,
            total_referrals: row.total_referrals,
            network_size: row.network_size,
            rank: i as u32 + 1,
        })
        .collect()
}

pub struct GetRankingUseCase<N: NetworkQueries, U: UserRepository> {
    pub network: N,
    pub users: U,
}

impl<N: NetworkQueries, U: UserRepository> GetRankingUseCase<N, U> {
    /// Top `limit` users. When the aggregate query is unavailable the
    /// view degrades to a plain user listing with zeroed counters.
    pub async fn execute(&self, limit: u64) -> Result<RankingView, ReferralServiceError> {
        match self.network.referral_counts().await {
            Ok(rows) => {
                let mut entries = ranked_entries(rows);
                entries.truncate(limit as usize);
                Ok(RankingView {
                    entries,
                    degraded: false,
                })
            }
            Err(ReferralServiceError::Internal(e)) => {
                tracing::warn!(error = %e, "ranking aggregate unavailable, listing users unranked");
                let users = self.users.list_basic(limit).await?;
                let entries = users
                    .into_iter()
                    .enumerate()
                    .map(|(i, user)| UserRanking {
                        id: user.id,
                        name: user.display_name(),
                        referral_code: user.referral_code,
                        total_referrals: 0,
                        network_size: 0,
                        rank: i as u32 + 1,
                    })
                    .collect();
                Ok(RankingView {
                    entries,
                    degraded: true,
                })
            }
            Err(other) => Err(other),
        }
    }
}
