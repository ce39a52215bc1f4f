use chrono::{DateTime, FixedOffset, Utc};
use uuid::Uuid;

use enlace_referrals::domain::types::RankingRow;
use enlace_referrals::usecase::stats::GetStatsUseCase;

use crate::helpers::{MockNetwork, MockReferralRepo, MockUserRepo, test_referral, test_user};

fn utc(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn campaign_offset() -> FixedOffset {
    FixedOffset::west_opt(5 * 3600).unwrap()
}

#[tokio::test]
async fn should_count_new_referrals_against_the_campaign_month_boundary() {
    let user = test_user("1000000001", "GGF-AAAAAA");

    // Month starts 2026-08-01T00:00-05:00 = 2026-08-01T05:00Z.
    let mut before = test_referral(user.id, "900100200");
    before.created_at = utc("2026-08-01T04:59:00Z");
    let mut after = test_referral(user.id, "900100201");
    after.created_at = utc("2026-08-01T05:01:00Z");

    let uc = GetStatsUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        referrals: MockReferralRepo::new(vec![before, after]),
        network: MockNetwork::with_counts(vec![RankingRow {
            user_id: user.id,
            name: user.display_name(),
            referral_code: user.referral_code.clone(),
            total_referrals: 2,
            network_size: 2,
            created_at: user.created_at,
        }]),
        campaign_offset: campaign_offset(),
    };

    let stats = uc
        .execute_at(user.id, utc("2026-08-30T12:00:00Z"))
        .await
        .unwrap();

    assert_eq!(stats.total_users, 1);
    assert_eq!(stats.total_referrals, 2);
    assert_eq!(stats.new_this_month, 1);
    assert_eq!(stats.user_rank, 1);
}

#[tokio::test]
async fn should_report_unranked_when_aggregate_is_down() {
    let user = test_user("1000000001", "GGF-AAAAAA");
    let mut network = MockNetwork::default();
    network.fail_counts = true;

    let uc = GetStatsUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        referrals: MockReferralRepo::empty(),
        network,
        campaign_offset: campaign_offset(),
    };
    let stats = uc.execute(user.id).await.unwrap();
    assert_eq!(stats.user_rank, 0);
}

#[tokio::test]
async fn should_report_unranked_for_user_missing_from_aggregate() {
    let user = test_user("1000000001", "GGF-AAAAAA");

    let uc = GetStatsUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        referrals: MockReferralRepo::empty(),
        network: MockNetwork::with_counts(vec![]),
        campaign_offset: campaign_offset(),
    };
    let stats = uc.execute(Uuid::new_v4()).await.unwrap();
    assert_eq!(stats.user_rank, 0);
}
