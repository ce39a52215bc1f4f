pub mod feed;
pub mod referral;
pub mod register;
pub mod reports;
pub mod session;
pub mod user;
