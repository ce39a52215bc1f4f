//! Dashboard statistics.

use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Utc};
use uuid::Uuid;

use enlace_domain::network::Stats;

use crate::domain::repository::{NetworkQueries, ReferralRepository, UserRepository};
use crate::error::ReferralServiceError;
use crate::usecase::ranking::ranked_entries;

/// Start of the current month in campaign local time, as a UTC instant.
pub fn month_start(
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> Result<DateTime<Utc>, ReferralServiceError> {
    let local = now.with_timezone(&offset);
    let start = offset
        .with_ymd_and_hms(local.year(), local.month(), 1, 0, 0, 0)
        .single()
        .ok_or_else(|| {
            ReferralServiceError::Internal(anyhow::anyhow!(
                "no unambiguous month start for {local}"
            ))
        })?;
    Ok(start.with_timezone(&Utc))
}

pub struct GetStatsUseCase<U: UserRepository, R: ReferralRepository, N: NetworkQueries> {
    pub users: U,
    pub referrals: R,
    pub network: N,
    pub campaign_offset: FixedOffset,
}

impl<U: UserRepository, R: ReferralRepository, N: NetworkQueries> GetStatsUseCase<U, R, N> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Stats, ReferralServiceError> {
        self.execute_at(user_id, Utc::now()).await
    }

    /// `now` is a parameter so month-boundary behavior is testable.
    pub async fn execute_at(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Stats, ReferralServiceError> {
        let total_users = self.users.count().await?;
        let total_referrals = self.referrals.count_by_referrer(user_id).await?;
        let cutoff = month_start(now, self.campaign_offset)?;
        let new_this_month = self
            .referrals
            .count_by_referrer_since(user_id, cutoff)
            .await?;

        // Rank is decoration on the dashboard; an unavailable aggregate
        // reports "unranked" (0) rather than failing the whole card.
        let user_rank = match self.network.referral_counts().await {
            Ok(rows) => ranked_entries(rows)
                .into_iter()
                .find(|entry| entry.id == user_id)
                .map(|entry| entry.rank)
                .unwrap_or(0),
            Err(ReferralServiceError::Internal(e)) => {
                tracing::warn!(error = %e, "ranking aggregate unavailable, omitting user rank");
                0
            }
            Err(other) => return Err(other),
        };

        Ok(Stats {
            total_users,
            total_referrals,
            new_this_month,
            user_rank,
        })
    }
}
