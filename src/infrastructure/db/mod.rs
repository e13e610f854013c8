use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

pub type DbPool = Pool<Sqlite>;

pub async fn connect_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &DbPool) -> anyhow::Result<()> {
    // Uses compile-time embedded migrations under ./migrations
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub mod repositories;
pub mod seed;

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::application::ports::file_repository::{FileRepository, NewFile};
    use crate::application::ports::user_repository::UserRepository;
    use crate::domain::files::file::{FileContent, StoredFile};
    use crate::domain::users::user::{Designation, Role, User};
    use crate::infrastructure::db::repositories::file_repository_sqlx::SqlxFileRepository;
    use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;

    /// Fresh migrated in-memory database. A single connection keeps every
    /// query on the same :memory: instance.
    pub(crate) async fn memory_pool() -> DbPool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        migrate(&pool).await.expect("migrations");
        pool
    }

    /// Inserts a user directly. The hash is a placeholder, good enough for
    /// everything that never verifies a password.
    pub(crate) async fn mk_user(
        repo: &SqlxUserRepository,
        username: &str,
        email: &str,
        role: Role,
        designation: Option<Designation>,
    ) -> User {
        repo.create_user(username, email, "unverifiable", role, designation)
            .await
            .expect("create user")
    }

    pub(crate) async fn mk_file(
        repo: &SqlxFileRepository,
        owner: &User,
        title: &str,
        content: FileContent,
    ) -> StoredFile {
        repo.insert(NewFile {
            user_id: owner.id,
            username: owner.username.clone(),
            user_role: owner.role,
            user_designation: owner.designation,
            title: title.to_string(),
            category: None,
            signature: None,
            content,
            report_date: None,
            images: None,
        })
        .await
        .expect("insert file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::user_repository::UserRepository;
    use crate::domain::users::user::Role;
    use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;

    #[tokio::test]
    async fn data_survives_a_reopen_of_the_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("app.db").display());

        let pool = connect_pool(&url).await.unwrap();
        migrate(&pool).await.unwrap();
        let repo = SqlxUserRepository::new(pool.clone());
        let user = repo
            .create_user("Demo Student", "student@demo.com", "h", Role::Student, None)
            .await
            .unwrap();
        pool.close().await;

        let pool = connect_pool(&url).await.unwrap();
        migrate(&pool).await.unwrap();
        let repo = SqlxUserRepository::new(pool);
        let found = repo.find_by_email("student@demo.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.username, "Demo Student");
    }
}
