//! In-memory identity provider speaking the GoTrue-style REST surface:
//! `POST /signup`, `POST /token?grant_type=password`, `POST /logout`.
//!
//! Spawn it on an ephemeral port and point the service's identity
//! client at `base_url()`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::post,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone)]
struct Account {
    id: Uuid,
    password: String,
}

#[derive(Clone, Default)]
struct Accounts {
    by_email: Arc<Mutex<HashMap<String, Account>>>,
}

#[derive(Deserialize)]
struct CredentialsBody {
    email: String,
    password: String,
}

#[derive(Serialize)]
struct SignUpResponse {
    id: Uuid,
    email: String,
}

#[derive(Serialize)]
struct TokenUser {
    id: Uuid,
}

#[derive(Serialize)]
struct TokenResponse {
    access_token: String,
    token_type: &'static str,
    user: TokenUser,
}

#[derive(Deserialize)]
struct TokenQuery {
    grant_type: Option<String>,
}

async fn signup(
    State(accounts): State<Accounts>,
    Json(body): Json<CredentialsBody>,
) -> Result<Json<SignUpResponse>, StatusCode> {
    let mut by_email = accounts.by_email.lock().unwrap();
    if by_email.contains_key(&body.email) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let account = Account {
        id: Uuid::new_v4(),
        password: body.password,
    };
    let id = account.id;
    by_email.insert(body.email.clone(), account);
    Ok(Json(SignUpResponse {
        id,
        email: body.email,
    }))
}

async fn token(
    State(accounts): State<Accounts>,
    Query(query): Query<TokenQuery>,
    Json(body): Json<CredentialsBody>,
) -> Result<Json<TokenResponse>, StatusCode> {
    if query.grant_type.as_deref() != Some("password") {
        return Err(StatusCode::BAD_REQUEST);
    }
    let by_email = accounts.by_email.lock().unwrap();
    match by_email.get(&body.email) {
        Some(account) if account.password == body.password => Ok(Json(TokenResponse {
            access_token: format!("mock-token-{}", account.id),
            token_type: "bearer",
            user: TokenUser { id: account.id },
        })),
        _ => Err(StatusCode::BAD_REQUEST),
    }
}

async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Running mock identity provider bound to an ephemeral local port.
pub struct MockIdentityServer {
    base_url: String,
    accounts: Accounts,
}

impl MockIdentityServer {
    /// Bind and serve in a background task. The server lives as long as
    /// the test process.
    pub async fn spawn() -> Self {
        let accounts = Accounts::default();
        let router = Router::new()
            .route("/signup", post(signup))
            .route("/token", post(token))
            .route("/logout", post(logout))
            .with_state(accounts.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock identity server");
        let addr = listener.local_addr().expect("mock identity local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            accounts,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Pre-register an account without going through `/signup`.
    pub fn seed_account(&self, email: &str, password: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.accounts.by_email.lock().unwrap().insert(
            email.to_owned(),
            Account {
                id,
                password: password.to_owned(),
            },
        );
        id
    }

    pub fn account_count(&self) -> usize {
        self.accounts.by_email.lock().unwrap().len()
    }
}
