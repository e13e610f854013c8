use std::str::FromStr;

use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::{Designation, Role, User};
use crate::infrastructure::db::DbPool;

pub struct SqlxUserRepository {
    pub pool: DbPool,
}

impl SqlxUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(r: &SqliteRow) -> anyhow::Result<User> {
    let designation = r
        .get::<Option<String>, _>("designation")
        .map(|s| Designation::from_str(&s))
        .transpose()?;
    Ok(User {
        id: Uuid::parse_str(&r.get::<String, _>("id"))?,
        username: r.get("username"),
        email: r.get("email"),
        password_hash: r.try_get("password_hash").ok(),
        role: Role::from_str(&r.get::<String, _>("role"))?,
        designation,
    })
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: Role,
        designation: Option<Designation>,
    ) -> anyhow::Result<User> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"INSERT INTO users (id, username, email, password_hash, role, designation)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
        )
        .bind(id.to_string())
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role.as_str())
        .bind(designation.map(Designation::as_str))
        .execute(&self.pool)
        .await?;
        Ok(User {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: Some(password_hash.to_string()),
            role,
            designation,
        })
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            r#"SELECT id, username, email, password_hash, role, designation
               FROM users WHERE LOWER(email) = LOWER(?1)"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            r#"SELECT id, username, email, password_hash, role, designation
               FROM users WHERE id = ?1"#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn count(&self) -> anyhow::Result<i64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::test_support::memory_pool;

    #[tokio::test]
    async fn roundtrips_role_and_designation() {
        let pool = memory_pool().await;
        let repo = SqlxUserRepository::new(pool);
        let created = repo
            .create_user(
                "Dr. Dean Anderson",
                "dean@demo.com",
                "h",
                Role::Staff,
                Some(Designation::Dean),
            )
            .await
            .unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.username, "Dr. Dean Anderson");
        assert_eq!(found.role, Role::Staff);
        assert_eq!(found.designation, Some(Designation::Dean));
        assert_eq!(found.password_hash.as_deref(), Some("h"));
    }

    #[tokio::test]
    async fn email_lookup_ignores_case() {
        let pool = memory_pool().await;
        let repo = SqlxUserRepository::new(pool);
        repo.create_user("Demo Student", "student@demo.com", "h", Role::Student, None)
            .await
            .unwrap();

        let found = repo.find_by_email("Student@DEMO.com").await.unwrap();
        assert!(found.is_some());
        assert!(repo.find_by_email("other@demo.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn counts_rows() {
        let pool = memory_pool().await;
        let repo = SqlxUserRepository::new(pool);
        assert_eq!(repo.count().await.unwrap(), 0);
        repo.create_user("A", "a@demo.com", "h", Role::Student, None)
            .await
            .unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn exact_duplicate_emails_are_rejected_by_the_schema() {
        let pool = memory_pool().await;
        let repo = SqlxUserRepository::new(pool);
        repo.create_user("A", "a@demo.com", "h", Role::Student, None)
            .await
            .unwrap();
        let err = repo
            .create_user("B", "a@demo.com", "h", Role::Student, None)
            .await;
        assert!(err.is_err());
    }
}
