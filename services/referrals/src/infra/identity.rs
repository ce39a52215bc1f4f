//! HTTP client for the external identity provider.
//!
//! The provider exposes a GoTrue-style REST surface: `POST /signup`,
//! `POST /token?grant_type=password`, `POST /logout`.

use std::time::Duration;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use enlace_auth_types::session::Session;

use crate::domain::repository::IdentityProvider;
use crate::error::ReferralServiceError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIdentityProvider {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("build identity http client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct SignUpResponse {
    id: Uuid,
}

#[derive(Deserialize)]
struct TokenUser {
    id: Uuid,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

impl IdentityProvider for HttpIdentityProvider {
    async fn sign_up(&self, email: &str, secret: &str) -> Result<Uuid, ReferralServiceError> {
        let response = self
            .client
            .post(format!("{}/signup", self.base_url))
            .json(&CredentialsBody {
                email,
                password: secret,
            })
            .send()
            .await
            .context("identity sign up request")?;

        match response.status() {
            status if status.is_success() => {
                let body: SignUpResponse =
                    response.json().await.context("identity sign up response")?;
                Ok(body.id)
            }
            // GoTrue answers 422 when the email is already registered.
            reqwest::StatusCode::UNPROCESSABLE_ENTITY | reqwest::StatusCode::CONFLICT => {
                Err(ReferralServiceError::IdentificationTaken)
            }
            status => Err(ReferralServiceError::Internal(anyhow::anyhow!(
                "identity sign up failed with status {status}"
            ))),
        }
    }

    async fn sign_in(&self, email: &str, secret: &str) -> Result<Session, ReferralServiceError> {
        let response = self
            .client
            .post(format!("{}/token", self.base_url))
            .query(&[("grant_type", "password")])
            .json(&CredentialsBody {
                email,
                password: secret,
            })
            .send()
            .await
            .context("identity sign in request")?;

        match response.status() {
            status if status.is_success() => {
                let body: TokenResponse =
                    response.json().await.context("identity sign in response")?;
                Ok(Session {
                    identity_id: body.user.id,
                    access_token: body.access_token,
                })
            }
            reqwest::StatusCode::BAD_REQUEST | reqwest::StatusCode::UNAUTHORIZED => {
                Err(ReferralServiceError::InvalidCredentials)
            }
            status => Err(ReferralServiceError::Internal(anyhow::anyhow!(
                "identity sign in failed with status {status}"
            ))),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ReferralServiceError> {
        let response = self
            .client
            .post(format!("{}/logout", self.base_url))
            .bearer_auth(access_token)
            .send()
            .await
            .context("identity sign out request")?;

        match response.status() {
            status if status.is_success() => Ok(()),
            reqwest::StatusCode::UNAUTHORIZED => Err(ReferralServiceError::InvalidCredentials),
            status => Err(ReferralServiceError::Internal(anyhow::anyhow!(
                "identity sign out failed with status {status}"
            ))),
        }
    }
}
