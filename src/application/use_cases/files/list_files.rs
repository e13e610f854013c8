use uuid::Uuid;

use crate::application::access;
use crate::application::ports::file_repository::FileRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::files::file::StoredFile;

pub struct ListUserFiles<'a, U, F>
where
    U: UserRepository + ?Sized,
    F: FileRepository + ?Sized,
{
    pub users: &'a U,
    pub files: &'a F,
}

impl<'a, U, F> ListUserFiles<'a, U, F>
where
    U: UserRepository + ?Sized,
    F: FileRepository + ?Sized,
{
    /// `Ok(None)` when the user does not exist. The scope is resolved
    /// from the user's current record, not from any stored snapshot.
    pub async fn execute(&self, user_id: Uuid) -> anyhow::Result<Option<Vec<StoredFile>>> {
        let user = match self.users.find_by_id(user_id).await? {
            Some(u) => u,
            None => return Ok(None),
        };
        let scope = access::scope_for(user.role, user.designation);
        let files = self.files.list_visible(user.id, scope).await?;
        Ok(Some(files))
    }
}
