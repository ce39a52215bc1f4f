use uuid::Uuid;

use enlace_domain::activity::ActivityAction;
use enlace_domain::pagination::PageRequest;
use enlace_domain::referral::ReferralStatus;
use enlace_referrals::domain::types::ReferralPatch;
use enlace_referrals::error::ReferralServiceError;
use enlace_referrals::usecase::activity::RecordActivityUseCase;
use enlace_referrals::usecase::referral::{
    AddReferralInput, AddReferralUseCase, DeleteReferralUseCase, ListReferralsUseCase,
    UpdateReferralUseCase,
};

use crate::helpers::{MockActivityRepo, MockReferralRepo, test_referral};

fn add_input(identification: &str) -> AddReferralInput {
    AddReferralInput {
        identification: identification.to_owned(),
        first_name: "Rosa".into(),
        last_name: "Mejía".into(),
        gender: None,
        birth_date: None,
        phone: None,
        email: None,
        department: None,
        municipality: "Cali".into(),
        zone: None,
        neighborhood: None,
        occupation: None,
        terms_accepted: true,
        privacy_accepted: true,
    }
}

// ── AddReferralUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_add_referral_as_pending_and_record_activity() {
    let owner = Uuid::new_v4();
    let referrals = MockReferralRepo::empty();
    let activity = MockActivityRepo::empty();
    let entries = activity.entries_handle();

    let uc = AddReferralUseCase {
        referrals,
        activity: RecordActivityUseCase { activity },
    };
    let referral = uc.execute(owner, add_input("900100200")).await.unwrap();

    assert_eq!(referral.status, ReferralStatus::Pending);
    assert_eq!(referral.referred_by, owner);
    assert_eq!(referral.user_id, None);

    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, ActivityAction::AddReferral);
    assert_eq!(entries[0].user_id, owner);
}

#[tokio::test]
async fn should_reject_duplicate_identification_campaign_wide() {
    let owner = Uuid::new_v4();
    let other_owner = Uuid::new_v4();
    // someone else already recruited this person
    let referrals = MockReferralRepo::new(vec![test_referral(other_owner, "900100200")]);
    let rows = referrals.rows_handle();

    let uc = AddReferralUseCase {
        referrals,
        activity: RecordActivityUseCase {
            activity: MockActivityRepo::empty(),
        },
    };
    let result = uc.execute(owner, add_input("900100200")).await;
    assert!(matches!(result, Err(ReferralServiceError::ReferralExists)));

    // the original row is untouched, nothing was written
    let rows = rows.lock().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].referred_by, other_owner);
}

#[tokio::test]
async fn should_require_both_consents() {
    let uc = AddReferralUseCase {
        referrals: MockReferralRepo::empty(),
        activity: RecordActivityUseCase {
            activity: MockActivityRepo::empty(),
        },
    };
    let mut input = add_input("900100200");
    input.privacy_accepted = false;
    let result = uc.execute(Uuid::new_v4(), input).await;
    assert!(matches!(result, Err(ReferralServiceError::ConsentRequired)));
}

// ── UpdateReferralUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_update_status_and_record_status_change() {
    let owner = Uuid::new_v4();
    let row = test_referral(owner, "900100200");
    let referrals = MockReferralRepo::new(vec![row.clone()]);
    let activity = MockActivityRepo::empty();
    let entries = activity.entries_handle();

    let uc = UpdateReferralUseCase {
        referrals,
        activity: RecordActivityUseCase { activity },
    };
    let patch = ReferralPatch {
        status: Some(ReferralStatus::Active),
        ..Default::default()
    };
    let updated = uc.execute(owner, row.id, patch).await.unwrap();

    assert_eq!(updated.status, ReferralStatus::Active);
    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, ActivityAction::StatusChange);
}

#[tokio::test]
async fn should_hide_other_owners_referrals_on_update() {
    let owner = Uuid::new_v4();
    let row = test_referral(owner, "900100200");
    let referrals = MockReferralRepo::new(vec![row.clone()]);

    let uc = UpdateReferralUseCase {
        referrals,
        activity: RecordActivityUseCase {
            activity: MockActivityRepo::empty(),
        },
    };
    let patch = ReferralPatch {
        status: Some(ReferralStatus::Active),
        ..Default::default()
    };
    let result = uc.execute(Uuid::new_v4(), row.id, patch).await;
    assert!(matches!(
        result,
        Err(ReferralServiceError::ReferralNotFound)
    ));
}

#[tokio::test]
async fn should_reject_empty_patch() {
    let uc = UpdateReferralUseCase {
        referrals: MockReferralRepo::empty(),
        activity: RecordActivityUseCase {
            activity: MockActivityRepo::empty(),
        },
    };
    let result = uc
        .execute(Uuid::new_v4(), Uuid::new_v4(), ReferralPatch::default())
        .await;
    assert!(matches!(result, Err(ReferralServiceError::MissingData)));
}

// ── DeleteReferralUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_owned_referral() {
    let owner = Uuid::new_v4();
    let row = test_referral(owner, "900100200");
    let referrals = MockReferralRepo::new(vec![row.clone()]);
    let rows = referrals.rows_handle();

    let uc = DeleteReferralUseCase { referrals };
    uc.execute(owner, row.id).await.unwrap();
    assert!(rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_report_missing_referral_on_delete() {
    let uc = DeleteReferralUseCase {
        referrals: MockReferralRepo::empty(),
    };
    let result = uc.execute(Uuid::new_v4(), Uuid::new_v4()).await;
    assert!(matches!(
        result,
        Err(ReferralServiceError::ReferralNotFound)
    ));
}

// ── ListReferralsUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_newest_first_with_exact_total() {
    let owner = Uuid::new_v4();
    let mut older = test_referral(owner, "900100200");
    older.created_at = older.created_at - chrono::Duration::minutes(5);
    let newer = test_referral(owner, "900100201");
    let unrelated = test_referral(Uuid::new_v4(), "900100202");
    let referrals = MockReferralRepo::new(vec![older.clone(), newer.clone(), unrelated]);

    let uc = ListReferralsUseCase { referrals };
    let (items, total) = uc
        .execute(
            owner,
            PageRequest {
                per_page: 1,
                page: 1,
            },
        )
        .await
        .unwrap();

    assert_eq!(total, 2);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, newer.id);
}
