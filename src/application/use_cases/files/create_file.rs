use uuid::Uuid;

use crate::application::ports::file_repository::{FileRepository, NewFile};
use crate::application::ports::stats_repository::StatsRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::sanitize;
use crate::domain::files::file::{EmbeddedImage, FileContent, FileKind, Signature, StoredFile};

#[derive(thiserror::Error, Debug)]
pub enum CreateFileError {
    #[error("User not found")]
    UnknownUser,
    #[error("{0}")]
    InvalidContent(&'static str),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub struct CreateFile<'a, U, F, S>
where
    U: UserRepository + ?Sized,
    F: FileRepository + ?Sized,
    S: StatsRepository + ?Sized,
{
    pub users: &'a U,
    pub files: &'a F,
    pub stats: &'a S,
}

#[derive(Debug, Clone)]
pub struct CreateFileRequest {
    pub title: String,
    pub kind: FileKind,
    pub category: Option<String>,
    pub signature: Option<Signature>,
    pub content: FileContent,
    pub report_date: Option<String>,
    pub images: Option<Vec<EmbeddedImage>>,
}

impl<'a, U, F, S> CreateFile<'a, U, F, S>
where
    U: UserRepository + ?Sized,
    F: FileRepository + ?Sized,
    S: StatsRepository + ?Sized,
{
    pub async fn execute(
        &self,
        caller: Uuid,
        req: CreateFileRequest,
    ) -> Result<StoredFile, CreateFileError> {
        match (req.kind, &req.content) {
            (FileKind::Report, FileContent::Report(_)) => {}
            (FileKind::Certificate, FileContent::Certificate(_)) => {}
            (FileKind::Report, _) => {
                return Err(CreateFileError::InvalidContent(
                    "Report content must be an HTML string.",
                ));
            }
            (FileKind::Certificate, _) => {
                return Err(CreateFileError::InvalidContent(
                    "Certificate content must be a structured record.",
                ));
            }
        }
        // Owner identity is snapshotted from the current record, never
        // trusted from the request body.
        let owner = self
            .users
            .find_by_id(caller)
            .await?
            .ok_or(CreateFileError::UnknownUser)?;
        let content = match req.content {
            FileContent::Report(html) => FileContent::Report(sanitize::clean_report_html(&html)),
            cert => cert,
        };
        let file = self
            .files
            .insert(NewFile {
                user_id: owner.id,
                username: owner.username.clone(),
                user_role: owner.role,
                user_designation: owner.designation,
                title: req.title,
                category: req.category,
                signature: req.signature,
                content,
                report_date: req.report_date,
                images: req.images,
            })
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, user_id = %owner.id, "insert_file_failed");
                err
            })?;
        self.stats
            .record_generated(owner.id, file.created_at)
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, user_id = %owner.id, "record_generated_failed");
                err
            })?;
        Ok(file)
    }
}
