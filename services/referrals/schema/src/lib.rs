//! sea-orm entities for the referrals service.

pub mod activity_log;
pub mod referrals;
pub mod users;
