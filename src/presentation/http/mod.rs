pub mod auth;
pub mod error;
pub mod files;
pub mod health;
pub mod stats;
pub mod users;
