pub mod file_repository_sqlx;
pub mod stats_repository_sqlx;
pub mod user_repository_sqlx;
