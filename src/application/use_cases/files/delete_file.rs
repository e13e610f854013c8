use uuid::Uuid;

use crate::application::ports::file_repository::FileRepository;

pub struct DeleteFile<'a, F: FileRepository + ?Sized> {
    pub files: &'a F,
}

impl<'a, F: FileRepository + ?Sized> DeleteFile<'a, F> {
    /// False when the file does not exist or `owner_id` does not own it.
    pub async fn execute(&self, file_id: Uuid, owner_id: Uuid) -> anyhow::Result<bool> {
        self.files.delete_owned(file_id, owner_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::files::list_files::ListUserFiles;
    use crate::domain::files::file::FileContent;
    use crate::domain::users::user::Role;
    use crate::infrastructure::db::repositories::file_repository_sqlx::SqlxFileRepository;
    use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
    use crate::infrastructure::db::test_support::{memory_pool, mk_file, mk_user};

    #[tokio::test]
    async fn owner_can_delete_their_file() {
        let pool = memory_pool().await;
        let users = SqlxUserRepository::new(pool.clone());
        let files = SqlxFileRepository::new(pool);
        let student = mk_user(&users, "Student", "student@demo.com", Role::Student, None).await;
        let file = mk_file(&files, &student, "Week 1", FileContent::Report("<p>r</p>".into())).await;

        let uc = DeleteFile { files: &files };
        assert!(uc.execute(file.id, student.id).await.unwrap());

        let listed = ListUserFiles { users: &users, files: &files }
            .execute(student.id)
            .await
            .unwrap()
            .unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn someone_else_cannot_delete_it() {
        let pool = memory_pool().await;
        let users = SqlxUserRepository::new(pool.clone());
        let files = SqlxFileRepository::new(pool);
        let student = mk_user(&users, "Student", "student@demo.com", Role::Student, None).await;
        let other = mk_user(&users, "Other", "other@demo.com", Role::Student, None).await;
        let file = mk_file(&files, &student, "Week 1", FileContent::Report("<p>r</p>".into())).await;

        let uc = DeleteFile { files: &files };
        assert!(!uc.execute(file.id, other.id).await.unwrap());

        let listed = ListUserFiles { users: &users, files: &files }
            .execute(student.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(listed.len(), 1);
    }
}
