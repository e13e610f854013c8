use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::auth::register::{Register, RegisterRequest};
use crate::domain::users::user::{Designation, Role};

const DEMO_PASSWORD: &str = "password123";

fn demo_accounts() -> Vec<RegisterRequest> {
    let account = |username: &str, email: &str, role: Role, designation: Option<Designation>| {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: DEMO_PASSWORD.to_string(),
            role,
            designation,
        }
    };
    vec![
        account("Demo Student", "student@demo.com", Role::Student, None),
        account(
            "Dr. Jane Faculty",
            "faculty@demo.com",
            Role::Staff,
            Some(Designation::Faculty),
        ),
        account(
            "Prof. Mark HOD",
            "hod@demo.com",
            Role::Staff,
            Some(Designation::Hod),
        ),
        account(
            "Dr. Dean Anderson",
            "dean@demo.com",
            Role::Staff,
            Some(Designation::Dean),
        ),
        account(
            "Dr. Principal Smith",
            "principal@demo.com",
            Role::Staff,
            Some(Designation::Principal),
        ),
    ]
}

/// Creates one demo account per tier, but only into an empty user table
/// so a real deployment is never polluted.
pub async fn seed_demo_users<R: UserRepository + ?Sized>(repo: &R) -> anyhow::Result<bool> {
    if repo.count().await? > 0 {
        return Ok(false);
    }
    let register = Register { repo };
    for req in demo_accounts() {
        register.execute(&req).await?;
    }
    tracing::info!("Seeded demo accounts (password: {DEMO_PASSWORD})");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
    use crate::infrastructure::db::test_support::memory_pool;

    #[tokio::test]
    async fn seeds_once_and_only_into_an_empty_table() {
        let pool = memory_pool().await;
        let repo = SqlxUserRepository::new(pool);

        assert!(seed_demo_users(&repo).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 5);

        assert!(!seed_demo_users(&repo).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 5);

        let hod = repo.find_by_email("hod@demo.com").await.unwrap().unwrap();
        assert_eq!(hod.role, Role::Staff);
        assert_eq!(hod.designation, Some(Designation::Hod));
    }
}
