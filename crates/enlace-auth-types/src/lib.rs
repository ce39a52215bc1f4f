//! Auth types shared across Enlace services.
//!
//! Provides the gateway-injected `Identity` extractor and the session
//! payload returned by the external identity provider.

pub mod identity;
pub mod session;
