use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Aggregate activity counters for one user.
#[derive(Debug, Clone)]
pub struct StatsRow {
    pub user_id: Uuid,
    pub generated: i64,
    pub downloaded: i64,
    pub last_activity: DateTime<Utc>,
}

#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn get_for_user(&self, user_id: Uuid) -> anyhow::Result<Option<StatsRow>>;
    /// Adds one to `generated`, creating the row on first use.
    async fn record_generated(&self, user_id: Uuid, at: DateTime<Utc>) -> anyhow::Result<()>;
    /// Adds one to `downloaded`, creating the row on first use.
    async fn record_downloaded(&self, user_id: Uuid, at: DateTime<Utc>) -> anyhow::Result<()>;
    /// Drops the row entirely. Missing rows are not an error.
    async fn clear_for_user(&self, user_id: Uuid) -> anyhow::Result<()>;
}
