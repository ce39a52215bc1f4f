use enlace_referrals::error::ReferralServiceError;
use enlace_referrals::usecase::code::{GenerateReferralCodeUseCase, ResolveReferralCodeUseCase};

use crate::helpers::{MockUserRepo, test_user};

#[tokio::test]
async fn should_generate_a_prefixed_six_char_code() {
    let uc = GenerateReferralCodeUseCase {
        users: MockUserRepo::empty(),
        prefix: "GGF".into(),
    };
    let code = uc.execute("1032456789").await.unwrap();
    let (prefix, suffix) = code.split_once('-').unwrap();
    assert_eq!(prefix, "GGF");
    assert_eq!(suffix.len(), 6);
}

#[tokio::test]
async fn should_derive_from_identification_when_existence_check_is_down() {
    let mut users = MockUserRepo::empty();
    users.fail_code_check = true;

    let uc = GenerateReferralCodeUseCase {
        users,
        prefix: "GGF".into(),
    };
    let code = uc.execute("1032456789").await.unwrap();
    assert_eq!(code, "GGF-456789");
}

#[tokio::test]
async fn should_resolve_an_existing_code_to_its_owner() {
    let user = test_user("1000000001", "GGF-ROOT01");
    let uc = ResolveReferralCodeUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };
    let resolved = uc.execute("GGF-ROOT01").await.unwrap();
    assert_eq!(resolved.id, user.id);
}

#[tokio::test]
async fn should_report_unknown_code() {
    let uc = ResolveReferralCodeUseCase {
        users: MockUserRepo::empty(),
    };
    let result = uc.execute("GGF-NOPE99").await;
    assert!(matches!(
        result,
        Err(ReferralServiceError::ReferralCodeNotFound)
    ));
}
