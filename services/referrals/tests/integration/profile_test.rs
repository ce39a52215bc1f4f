use uuid::Uuid;

use enlace_domain::activity::ActivityAction;
use enlace_referrals::domain::types::ProfilePatch;
use enlace_referrals::error::ReferralServiceError;
use enlace_referrals::usecase::activity::RecordActivityUseCase;
use enlace_referrals::usecase::user::{GetProfileUseCase, UpdateProfileUseCase};

use crate::helpers::{MockActivityRepo, MockReferralRepo, MockUserRepo, test_referral, test_user};

#[tokio::test]
async fn should_load_profile_with_direct_referral_count() {
    let user = test_user("1032456789", "GGF-AAAAAA");
    let referrals = MockReferralRepo::new(vec![
        test_referral(user.id, "900100200"),
        test_referral(user.id, "900100201"),
        test_referral(Uuid::new_v4(), "900100202"),
    ]);

    let uc = GetProfileUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        referrals,
    };
    let view = uc.execute(user.id).await.unwrap();
    assert_eq!(view.user.id, user.id);
    assert_eq!(view.total_referrals, 2);
}

#[tokio::test]
async fn should_report_missing_profile() {
    let uc = GetProfileUseCase {
        users: MockUserRepo::empty(),
        referrals: MockReferralRepo::empty(),
    };
    let result = uc.execute(Uuid::new_v4()).await;
    assert!(matches!(result, Err(ReferralServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_apply_patch_and_record_profile_update() {
    let user = test_user("1032456789", "GGF-AAAAAA");
    let users = MockUserRepo::new(vec![user.clone()]);
    let activity = MockActivityRepo::empty();
    let entries = activity.entries_handle();

    let uc = UpdateProfileUseCase {
        users,
        activity: RecordActivityUseCase { activity },
    };
    let patch = ProfilePatch {
        phone: Some("3001234567".into()),
        ..Default::default()
    };
    let updated = uc.execute(user.id, patch).await.unwrap();

    assert_eq!(updated.phone.as_deref(), Some("3001234567"));
    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, ActivityAction::ProfileUpdate);
}

#[tokio::test]
async fn should_reject_an_empty_profile_patch() {
    let uc = UpdateProfileUseCase {
        users: MockUserRepo::empty(),
        activity: RecordActivityUseCase {
            activity: MockActivityRepo::empty(),
        },
    };
    let result = uc.execute(Uuid::new_v4(), ProfilePatch::default()).await;
    assert!(matches!(result, Err(ReferralServiceError::MissingData)));
}
