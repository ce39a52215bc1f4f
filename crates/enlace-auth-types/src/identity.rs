//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use enlace_domain::user::UserRole;

/// User identity injected by the gateway via `x-enlace-user-id` and
/// `x-enlace-user-role` headers.
///
/// Returns 401 if `x-enlace-user-id` is absent or cannot be parsed as a
/// UUID, or if the role header does not name a known role.
/// Role enforcement (403) is done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Written as `fn -> impl Future` rather than `async fn`: axum-core 0.5
    // declares the trait method that way, and an `async fn` impl trips
    // E0195 under precise capturing. Headers are read synchronously so the
    // returned future is 'static.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get("x-enlace-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Uuid>().ok());

        let role = parts
            .headers
            .get("x-enlace-user-role")
            .and_then(|v| v.to_str().ok())
            .and_then(UserRole::from_str_opt);

        async move {
            let user_id = user_id.ok_or(StatusCode::UNAUTHORIZED)?;
            let role = role.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self { user_id, role })
        }
    }
}
