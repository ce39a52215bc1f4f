pub mod activity;
pub mod code;
pub mod network;
pub mod ranking;
pub mod referral;
pub mod register;
pub mod session;
pub mod stats;
pub mod user;
