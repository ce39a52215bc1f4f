//! Session payload issued by the external identity provider.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A durable session for an authenticated identity.
///
/// The service never mints or validates these tokens itself; they are
/// opaque values passed through from the identity provider to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Identity-provider id of the principal (not the profile row id).
    pub identity_id: Uuid,
    pub access_token: String,
}
