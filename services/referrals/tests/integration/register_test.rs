use uuid::Uuid;

use enlace_domain::activity::ActivityAction;
use enlace_referrals::error::ReferralServiceError;
use enlace_referrals::usecase::activity::RecordActivityUseCase;
use enlace_referrals::usecase::code::ResolveReferralCodeUseCase;
use enlace_referrals::usecase::register::{RegisterInput, RegisterUserUseCase};

use crate::helpers::{MockActivityRepo, MockIdentity, MockUserRepo, test_user};

fn usecase(
    users: MockUserRepo,
    activity: MockActivityRepo,
    identity: MockIdentity,
) -> RegisterUserUseCase<MockUserRepo, MockActivityRepo, MockIdentity> {
    RegisterUserUseCase {
        users,
        activity: RecordActivityUseCase { activity },
        identity,
        email_domain: "enlace.vote".into(),
        code_prefix: "GGF".into(),
    }
}

fn input(identification: &str, referral_code: Option<&str>) -> RegisterInput {
    RegisterInput {
        identification: identification.to_owned(),
        first_name: "Luis".into(),
        last_name: "Gómez".into(),
        phone: None,
        department: None,
        municipality: "Cali".into(),
        zone: None,
        neighborhood: None,
        birth_date: None,
        occupation: None,
        referral_code: referral_code.map(str::to_owned),
    }
}

#[tokio::test]
async fn should_register_with_valid_code_and_link_to_referrer() {
    let referrer = test_user("1000000001", "GGF-ROOT01");
    let users = MockUserRepo::new(vec![referrer.clone()]);
    let activity = MockActivityRepo::empty();
    let identity = MockIdentity::empty();

    let users_handle = users.users_handle();
    let entries = activity.entries_handle();

    let uc = usecase(users, activity, identity.clone());
    let output = uc
        .execute(input("1032456789", Some("GGF-ROOT01")))
        .await
        .unwrap();

    assert_eq!(output.user.parent_user_id, Some(referrer.id));
    assert!(output.user.referral_code.starts_with("GGF-"));
    assert!(!output.session.access_token.is_empty());
    assert_eq!(users_handle.lock().unwrap().len(), 2);
    assert_eq!(identity.account_count(), 1);

    // new_referral lands on the referrer's feed, not the new user's
    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].user_id, referrer.id);
    assert_eq!(entries[0].action, ActivityAction::NewReferral);
}

#[tokio::test]
async fn should_reject_unknown_code_without_creating_anything() {
    let users = MockUserRepo::empty();
    let identity = MockIdentity::empty();
    let users_handle = users.users_handle();

    let uc = usecase(users, MockActivityRepo::empty(), identity.clone());
    let result = uc.execute(input("1032456789", Some("GGF-NOPE99"))).await;

    assert!(matches!(
        result,
        Err(ReferralServiceError::ReferralCodeNotFound)
    ));
    assert_eq!(identity.account_count(), 0);
    assert!(users_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_non_numeric_identification() {
    let uc = usecase(
        MockUserRepo::empty(),
        MockActivityRepo::empty(),
        MockIdentity::empty(),
    );
    let result = uc.execute(input("not-digits", None)).await;
    assert!(matches!(
        result,
        Err(ReferralServiceError::InvalidIdentification)
    ));
}

#[tokio::test]
async fn should_register_without_code_as_organic_signup() {
    let activity = MockActivityRepo::empty();
    let entries = activity.entries_handle();

    let uc = usecase(MockUserRepo::empty(), activity, MockIdentity::empty());
    let output = uc.execute(input("1032456789", None)).await.unwrap();

    assert_eq!(output.user.parent_user_id, None);
    assert!(entries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_resolve_the_minted_code_back_to_the_new_user() {
    let users = MockUserRepo::empty();

    let uc = usecase(users.clone(), MockActivityRepo::empty(), MockIdentity::empty());
    let output = uc.execute(input("1032456789", None)).await.unwrap();

    // the code handed out at registration must point back at its owner
    let resolver = ResolveReferralCodeUseCase { users };
    let resolved = resolver.execute(&output.user.referral_code).await.unwrap();
    assert_eq!(resolved.id, output.user.id);
    assert_eq!(resolved.referral_code, output.user.referral_code);
}

#[tokio::test]
async fn should_retry_profile_insert_on_code_conflict() {
    let users = MockUserRepo::empty();
    *users.conflict_once.lock().unwrap() = true;
    let users_handle = users.users_handle();

    let uc = usecase(users, MockActivityRepo::empty(), MockIdentity::empty());
    let output = uc.execute(input("1032456789", None)).await.unwrap();

    assert!(output.user.referral_code.starts_with("GGF-"));
    assert_eq!(users_handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_not_fail_registration_when_activity_store_is_down() {
    let referrer = test_user("1000000001", "GGF-ROOT01");
    let users = MockUserRepo::new(vec![referrer]);

    let uc = usecase(users, MockActivityRepo::failing(), MockIdentity::empty());
    let result = uc.execute(input("1032456789", Some("GGF-ROOT01"))).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn should_reject_code_whose_chain_loops() {
    let mut a = test_user("1000000001", "GGF-AAAAAA");
    let mut b = test_user("1000000002", "GGF-BBBBBB");
    a.parent_user_id = Some(b.id);
    b.parent_user_id = Some(a.id);
    let users = MockUserRepo::new(vec![a, b]);
    let identity = MockIdentity::empty();

    let uc = usecase(users, MockActivityRepo::empty(), identity.clone());
    let result = uc.execute(input("1032456789", Some("GGF-AAAAAA"))).await;

    assert!(matches!(
        result,
        Err(ReferralServiceError::ReferralChainLoop)
    ));
    assert_eq!(identity.account_count(), 0);
}

#[tokio::test]
async fn should_surface_identification_conflict_from_profile_insert() {
    let existing = test_user("1032456789", "GGF-CCCCCC");
    let users = MockUserRepo::new(vec![existing]);

    let uc = usecase(users, MockActivityRepo::empty(), MockIdentity::empty());
    let result = uc.execute(input("1032456789", None)).await;
    assert!(matches!(
        result,
        Err(ReferralServiceError::IdentificationTaken)
    ));
}
