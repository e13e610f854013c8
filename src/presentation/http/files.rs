use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::files::create_file::{
    CreateFile as CreateFileUc, CreateFileError, CreateFileRequest as CreateFileDto,
};
use crate::application::use_cases::files::delete_file::DeleteFile as DeleteFileUc;
use crate::application::use_cases::files::list_files::ListUserFiles;
use crate::application::use_cases::files::purge_files::PurgeUserFiles;
use crate::application::use_cases::files::record_download::RecordDownload;
use crate::bootstrap::app_context::AppContext;
use crate::domain::files::file::{EmbeddedImage, FileContent, FileKind, Signature, StoredFile};
use crate::domain::users::user::{Designation, Role};
use crate::presentation::http::auth::{Bearer, require_user_id};
use crate::presentation::http::error::ApiError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFileRequest {
    pub title: String,
    pub r#type: FileKind,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub signature: Option<Signature>,
    pub content: FileContent,
    #[serde(default)]
    pub report_date: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<EmbeddedImage>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FileResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub user_role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_designation: Option<Designation>,
    pub title: String,
    pub r#type: FileKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
    pub content: FileContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<EmbeddedImage>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub downloads_count: i64,
}

impl From<StoredFile> for FileResponse {
    fn from(file: StoredFile) -> Self {
        FileResponse {
            id: file.id,
            user_id: file.user_id,
            username: file.username,
            user_role: file.user_role,
            user_designation: file.user_designation,
            title: file.title,
            r#type: file.kind,
            category: file.category,
            signature: file.signature,
            content: file.content,
            report_date: file.report_date,
            images: file.images,
            created_at: file.created_at,
            downloads_count: file.downloads_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FileListResponse {
    pub items: Vec<FileResponse>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/files", post(create_file))
        .route("/files/user/:user_id", get(list_user_files))
        .route("/files/user/:user_id/all", delete(purge_user_files))
        .route("/files/:file_id", delete(delete_file))
        .route("/files/:file_id/download", post(download_file))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/files", tag = "Files", request_body = CreateFileRequest, responses(
    (status = 200, body = FileResponse),
    (status = 400, body = crate::presentation::http::error::ErrorBody),
    (status = 401, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn create_file(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<CreateFileRequest>,
) -> Result<Json<FileResponse>, ApiError> {
    let caller = require_user_id(&ctx.cfg, bearer)?;
    let users = ctx.user_repo();
    let files = ctx.file_repo();
    let stats = ctx.stats_repo();
    let uc = CreateFileUc {
        users: users.as_ref(),
        files: files.as_ref(),
        stats: stats.as_ref(),
    };
    let dto = CreateFileDto {
        title: req.title,
        kind: req.r#type,
        category: req.category,
        signature: req.signature,
        content: req.content,
        report_date: req.report_date,
        images: req.images,
    };
    let file = uc.execute(caller, dto).await.map_err(|err| match err {
        CreateFileError::UnknownUser => ApiError::Unauthorized(err.to_string()),
        CreateFileError::InvalidContent(_) => ApiError::BadRequest(err.to_string()),
        CreateFileError::Other(err) => err.into(),
    })?;
    Ok(Json(file.into()))
}

/// The listing is scoped by the target user's current role and
/// designation; callers may only ask for their own repository.
#[utoipa::path(get, path = "/api/files/user/{user_id}", tag = "Files", params(
    ("user_id" = Uuid, Path,)
), responses(
    (status = 200, body = FileListResponse),
    (status = 403, body = crate::presentation::http::error::ErrorBody),
    (status = 404, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn list_user_files(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(user_id): Path<Uuid>,
) -> Result<Json<FileListResponse>, ApiError> {
    let caller = require_user_id(&ctx.cfg, bearer)?;
    if caller != user_id {
        return Err(ApiError::Forbidden(
            "Cannot access another user's repository.".into(),
        ));
    }
    let users = ctx.user_repo();
    let files = ctx.file_repo();
    let uc = ListUserFiles {
        users: users.as_ref(),
        files: files.as_ref(),
    };
    let listed = uc
        .execute(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    Ok(Json(FileListResponse {
        items: listed.into_iter().map(FileResponse::from).collect(),
    }))
}

#[utoipa::path(post, path = "/api/files/{file_id}/download", tag = "Files", params(
    ("file_id" = Uuid, Path,)
), responses(
    (status = 204),
    (status = 404, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn download_file(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(file_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_user_id(&ctx.cfg, bearer)?;
    let files = ctx.file_repo();
    let stats = ctx.stats_repo();
    let uc = RecordDownload {
        files: files.as_ref(),
        stats: stats.as_ref(),
    };
    if !uc.execute(file_id).await? {
        return Err(ApiError::NotFound("File not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/api/files/{file_id}", tag = "Files", params(
    ("file_id" = Uuid, Path,)
), responses(
    (status = 204),
    (status = 404, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn delete_file(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(file_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let caller = require_user_id(&ctx.cfg, bearer)?;
    let files = ctx.file_repo();
    let uc = DeleteFileUc {
        files: files.as_ref(),
    };
    if !uc.execute(file_id, caller).await? {
        return Err(ApiError::NotFound("File not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/api/files/user/{user_id}/all", tag = "Files", params(
    ("user_id" = Uuid, Path,)
), responses(
    (status = 204),
    (status = 403, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn purge_user_files(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let caller = require_user_id(&ctx.cfg, bearer)?;
    if caller != user_id {
        return Err(ApiError::Forbidden(
            "Cannot clear another user's repository.".into(),
        ));
    }
    let files = ctx.file_repo();
    let stats = ctx.stats_repo();
    let uc = PurgeUserFiles {
        files: files.as_ref(),
        stats: stats.as_ref(),
    };
    uc.execute(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
