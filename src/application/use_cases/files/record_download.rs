use chrono::Utc;
use uuid::Uuid;

use crate::application::ports::file_repository::FileRepository;
use crate::application::ports::stats_repository::StatsRepository;

pub struct RecordDownload<'a, F, S>
where
    F: FileRepository + ?Sized,
    S: StatsRepository + ?Sized,
{
    pub files: &'a F,
    pub stats: &'a S,
}

impl<'a, F, S> RecordDownload<'a, F, S>
where
    F: FileRepository + ?Sized,
    S: StatsRepository + ?Sized,
{
    /// Bumps the file counter and credits the file owner's aggregate,
    /// whoever triggered the download. Returns false for an unknown file.
    pub async fn execute(&self, file_id: Uuid) -> anyhow::Result<bool> {
        let owner = match self.files.owner_of(file_id).await? {
            Some(o) => o,
            None => return Ok(false),
        };
        self.files.increment_downloads(file_id).await?;
        self.stats.record_downloaded(owner, Utc::now()).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::files::list_files::ListUserFiles;
    use crate::domain::files::file::FileContent;
    use crate::domain::users::user::Role;
    use crate::infrastructure::db::repositories::file_repository_sqlx::SqlxFileRepository;
    use crate::infrastructure::db::repositories::stats_repository_sqlx::SqlxStatsRepository;
    use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
    use crate::infrastructure::db::test_support::{memory_pool, mk_file, mk_user};

    #[tokio::test]
    async fn each_download_bumps_the_file_and_the_owner_aggregate() {
        let pool = memory_pool().await;
        let users = SqlxUserRepository::new(pool.clone());
        let files = SqlxFileRepository::new(pool.clone());
        let stats = SqlxStatsRepository::new(pool);
        let student = mk_user(&users, "Student", "student@demo.com", Role::Student, None).await;
        let file = mk_file(&files, &student, "Week 1", FileContent::Report("<p>r</p>".into())).await;

        let uc = RecordDownload { files: &files, stats: &stats };
        assert!(uc.execute(file.id).await.unwrap());
        assert!(uc.execute(file.id).await.unwrap());

        let listed = ListUserFiles { users: &users, files: &files }
            .execute(student.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(listed[0].downloads_count, 2);

        let row = stats.get_for_user(student.id).await.unwrap().unwrap();
        assert_eq!(row.downloaded, 2);
    }

    #[tokio::test]
    async fn unknown_file_leaves_everything_untouched() {
        let pool = memory_pool().await;
        let files = SqlxFileRepository::new(pool.clone());
        let stats = SqlxStatsRepository::new(pool);

        let uc = RecordDownload { files: &files, stats: &stats };
        assert!(!uc.execute(Uuid::new_v4()).await.unwrap());
    }
}
