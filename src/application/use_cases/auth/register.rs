use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::domain::users::user::{Designation, Role, User};

use crate::application::ports::user_repository::UserRepository;

#[derive(thiserror::Error, Debug)]
pub enum RegisterError {
    #[error("User already exists with this email.")]
    EmailTaken,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub designation: Option<Designation>,
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> Result<User, RegisterError> {
        let email = req.email.trim().to_lowercase();
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(RegisterError::EmailTaken);
        }
        // Designations only make sense on staff records.
        let designation = match req.role {
            Role::Staff => req.designation,
            Role::Student => None,
        };
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?
            .to_string();
        let user = self
            .repo
            .create_user(&req.username, &email, &hash, req.role, designation)
            .await?;
        Ok(user)
    }
}
