use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::users::user::{Designation, Role, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: Role,
        designation: Option<Designation>,
    ) -> anyhow::Result<User>;
    /// Case-insensitive on the email.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn count(&self) -> anyhow::Result<i64>;
}
