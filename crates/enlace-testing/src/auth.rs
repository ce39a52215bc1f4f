//! Mock gateway identity for integration tests.
//!
//! Services behind the gateway receive `x-enlace-user-id` +
//! `x-enlace-user-role` headers. In tests, `MockAuth` builds these
//! headers directly so no real gateway is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use enlace_domain::user::UserRole;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn volunteer(user_id: Uuid) -> Self {
        Self::new(user_id, UserRole::Volunteer)
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static("x-enlace-user-id"),
            HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
        );
        map.insert(
            HeaderName::from_static("x-enlace-user-role"),
            HeaderValue::from_static(self.role.as_str()),
        );
        map
    }
}
