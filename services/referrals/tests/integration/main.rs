
mod activity_test;
mod code_test;
mod feed_test;
mod identity_test;
mod network_test;
mod profile_test;
mod referral_test;
mod register_test;
mod stats_test;
