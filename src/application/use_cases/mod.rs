pub mod auth;
pub mod files;
pub mod stats;
pub mod users;
