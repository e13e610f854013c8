use async_trait::async_trait;
use uuid::Uuid;

use crate::application::access::VisibilityScope;
use crate::domain::files::file::{EmbeddedImage, FileContent, Signature, StoredFile};
use crate::domain::users::user::{Designation, Role};

/// Payload plus owner snapshot for a file about to be stored. The id and
/// creation timestamp are assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewFile {
    pub user_id: Uuid,
    pub username: String,
    pub user_role: Role,
    pub user_designation: Option<Designation>,
    pub title: String,
    pub category: Option<String>,
    pub signature: Option<Signature>,
    pub content: FileContent,
    pub report_date: Option<String>,
    pub images: Option<Vec<EmbeddedImage>>,
}

#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn insert(&self, file: NewFile) -> anyhow::Result<StoredFile>;
    /// Every file `caller` may read under `scope`, newest first.
    async fn list_visible(
        &self,
        caller: Uuid,
        scope: VisibilityScope,
    ) -> anyhow::Result<Vec<StoredFile>>;
    async fn owner_of(&self, file_id: Uuid) -> anyhow::Result<Option<Uuid>>;
    /// Returns false for an unknown file.
    async fn increment_downloads(&self, file_id: Uuid) -> anyhow::Result<bool>;
    /// Deletes only when `owner_id` owns the file. Returns whether a row
    /// went away.
    async fn delete_owned(&self, file_id: Uuid, owner_id: Uuid) -> anyhow::Result<bool>;
    /// Deletes every file owned by `owner_id`, returning the count.
    async fn delete_all_for_owner(&self, owner_id: Uuid) -> anyhow::Result<u64>;
}
