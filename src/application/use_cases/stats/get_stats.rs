use uuid::Uuid;

use crate::application::ports::stats_repository::{StatsRepository, StatsRow};

pub struct GetUserStats<'a, S: StatsRepository + ?Sized> {
    pub stats: &'a S,
}

impl<'a, S: StatsRepository + ?Sized> GetUserStats<'a, S> {
    /// `Ok(None)` for a user who never generated or downloaded anything;
    /// the presentation layer serves a zeroed row in that case.
    pub async fn execute(&self, user_id: Uuid) -> anyhow::Result<Option<StatsRow>> {
        self.stats.get_for_user(user_id).await
    }
}
