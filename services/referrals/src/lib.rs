//! Referral-tracking service: registration, referral management,
//! network reports and the live change feed.

pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod infra;
pub mod router;
pub mod state;
pub mod usecase;
