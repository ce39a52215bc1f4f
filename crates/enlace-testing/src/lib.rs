//! Test utilities for Enlace services.
//!
//! Provides gateway header injection (`MockAuth`) and an in-memory
//! identity provider (`MockIdentityServer`). Import in tests only,
//! never in production code.

pub mod auth;
pub mod identity;
