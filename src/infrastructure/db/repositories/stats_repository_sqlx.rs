use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::stats_repository::{StatsRepository, StatsRow};
use crate::infrastructure::db::DbPool;

pub struct SqlxStatsRepository {
    pub pool: DbPool,
}

impl SqlxStatsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for SqlxStatsRepository {
    async fn get_for_user(&self, user_id: Uuid) -> anyhow::Result<Option<StatsRow>> {
        let row = sqlx::query(
            r#"SELECT user_id, generated, downloaded, last_activity
               FROM stats WHERE user_id = ?1"#,
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(r) => Ok(Some(StatsRow {
                user_id: Uuid::parse_str(&r.get::<String, _>("user_id"))?,
                generated: r.get("generated"),
                downloaded: r.get("downloaded"),
                last_activity: r.get("last_activity"),
            })),
            None => Ok(None),
        }
    }

    async fn record_generated(&self, user_id: Uuid, at: DateTime<Utc>) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO stats (user_id, generated, downloaded, last_activity)
               VALUES (?1, 1, 0, ?2)
               ON CONFLICT(user_id) DO UPDATE SET
                   generated = generated + 1,
                   last_activity = excluded.last_activity"#,
        )
        .bind(user_id.to_string())
        .bind(at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn record_downloaded(&self, user_id: Uuid, at: DateTime<Utc>) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO stats (user_id, generated, downloaded, last_activity)
               VALUES (?1, 0, 1, ?2)
               ON CONFLICT(user_id) DO UPDATE SET
                   downloaded = downloaded + 1,
                   last_activity = excluded.last_activity"#,
        )
        .bind(user_id.to_string())
        .bind(at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn clear_for_user(&self, user_id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM stats WHERE user_id = ?1")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::test_support::memory_pool;

    #[tokio::test]
    async fn counters_accumulate_per_user() {
        let pool = memory_pool().await;
        let repo = SqlxStatsRepository::new(pool);
        let user = Uuid::new_v4();

        assert!(repo.get_for_user(user).await.unwrap().is_none());

        let t1 = Utc::now();
        repo.record_generated(user, t1).await.unwrap();
        repo.record_generated(user, t1).await.unwrap();
        repo.record_downloaded(user, t1).await.unwrap();

        let row = repo.get_for_user(user).await.unwrap().unwrap();
        assert_eq!(row.user_id, user);
        assert_eq!(row.generated, 2);
        assert_eq!(row.downloaded, 1);
    }

    #[tokio::test]
    async fn last_activity_follows_the_latest_record() {
        let pool = memory_pool().await;
        let repo = SqlxStatsRepository::new(pool);
        let user = Uuid::new_v4();

        let t1 = Utc::now();
        let t2 = t1 + chrono::Duration::seconds(10);
        repo.record_generated(user, t1).await.unwrap();
        repo.record_downloaded(user, t2).await.unwrap();

        let row = repo.get_for_user(user).await.unwrap().unwrap();
        assert_eq!(row.last_activity, t2);
    }

    #[tokio::test]
    async fn clearing_drops_the_row() {
        let pool = memory_pool().await;
        let repo = SqlxStatsRepository::new(pool);
        let user = Uuid::new_v4();

        repo.record_generated(user, Utc::now()).await.unwrap();
        repo.clear_for_user(user).await.unwrap();
        assert!(repo.get_for_user(user).await.unwrap().is_none());

        // Clearing an absent row stays quiet.
        repo.clear_for_user(user).await.unwrap();
    }
}
