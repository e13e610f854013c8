use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct FindUserByEmail<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> FindUserByEmail<'a, R> {
    pub async fn execute(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .repo
            .find_by_email(email.trim())
            .await?
            .map(User::sanitized))
    }
}
