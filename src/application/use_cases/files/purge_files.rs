use uuid::Uuid;

use crate::application::ports::file_repository::FileRepository;
use crate::application::ports::stats_repository::StatsRepository;

pub struct PurgeUserFiles<'a, F, S>
where
    F: FileRepository + ?Sized,
    S: StatsRepository + ?Sized,
{
    pub files: &'a F,
    pub stats: &'a S,
}

impl<'a, F, S> PurgeUserFiles<'a, F, S>
where
    F: FileRepository + ?Sized,
    S: StatsRepository + ?Sized,
{
    /// Removes every file owned by `owner_id` along with the aggregate
    /// counters, returning how many files went away.
    pub async fn execute(&self, owner_id: Uuid) -> anyhow::Result<u64> {
        let removed = self.files.delete_all_for_owner(owner_id).await?;
        self.stats.clear_for_user(owner_id).await?;
        Ok(removed)
    }
}
