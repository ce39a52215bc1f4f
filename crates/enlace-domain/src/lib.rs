//! Domain types shared across the Enlace campaign services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod activity;
pub mod email;
pub mod id;
pub mod network;
pub mod pagination;
pub mod referral;
pub mod user;
