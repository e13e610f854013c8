pub mod file_repository;
pub mod stats_repository;
pub mod user_repository;
