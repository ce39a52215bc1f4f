//! Wire-level tests for the identity client against the in-memory
//! provider from `enlace-testing`.

use enlace_referrals::domain::repository::IdentityProvider as _;
use enlace_referrals::error::ReferralServiceError;
use enlace_referrals::infra::identity::HttpIdentityProvider;
use enlace_testing::identity::MockIdentityServer;

#[tokio::test]
async fn should_sign_up_and_sign_in_round_trip() {
    let server = MockIdentityServer::spawn().await;
    let client = HttpIdentityProvider::new(server.base_url()).unwrap();

    let id = client
        .sign_up("1032456789@enlace.vote", "1032456789")
        .await
        .unwrap();

    let session = client
        .sign_in("1032456789@enlace.vote", "1032456789")
        .await
        .unwrap();
    assert_eq!(session.identity_id, id);
    assert!(!session.access_token.is_empty());
}

#[tokio::test]
async fn should_map_duplicate_sign_up_to_identification_taken() {
    let server = MockIdentityServer::spawn().await;
    server.seed_account("1032456789@enlace.vote", "1032456789");
    let client = HttpIdentityProvider::new(server.base_url()).unwrap();

    let result = client.sign_up("1032456789@enlace.vote", "1032456789").await;
    assert!(matches!(
        result,
        Err(ReferralServiceError::IdentificationTaken)
    ));
}

#[tokio::test]
async fn should_normalize_bad_credentials() {
    let server = MockIdentityServer::spawn().await;
    server.seed_account("1032456789@enlace.vote", "1032456789");
    let client = HttpIdentityProvider::new(server.base_url()).unwrap();

    let wrong_password = client
        .sign_in("1032456789@enlace.vote", "wrong")
        .await;
    assert!(matches!(
        wrong_password,
        Err(ReferralServiceError::InvalidCredentials)
    ));

    let unknown_account = client.sign_in("999@enlace.vote", "999").await;
    assert!(matches!(
        unknown_account,
        Err(ReferralServiceError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn should_sign_out_with_a_bearer_token() {
    let server = MockIdentityServer::spawn().await;
    let client = HttpIdentityProvider::new(server.base_url()).unwrap();
    client.sign_out("mock-token-whatever").await.unwrap();
}
