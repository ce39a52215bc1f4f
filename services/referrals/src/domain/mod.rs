pub mod feed;
pub mod repository;
pub mod types;
