use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterError, RegisterRequest as RegisterDto,
};
use crate::application::use_cases::users::find_by_email::FindUserByEmail;
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::{Designation, Role, User};
use crate::presentation::http::error::ApiError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub designation: Option<Designation>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<Designation>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            designation: user.designation,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/email/:email", get(find_by_email))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/users", tag = "Users", request_body = CreateUserRequest, responses(
    (status = 200, body = UserResponse),
    (status = 400, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn create_user(
    State(ctx): State<AppContext>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let repo = ctx.user_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
    };
    let dto = RegisterDto {
        username: req.username,
        email: req.email,
        password: req.password,
        role: req.role,
        designation: req.designation,
    };
    let user = uc.execute(&dto).await.map_err(|err| match err {
        RegisterError::EmailTaken => ApiError::BadRequest(err.to_string()),
        RegisterError::Other(err) => err.into(),
    })?;
    Ok(Json(user.into()))
}

/// Serves `null` with a 200 when no account matches, which keeps the
/// lookup usable as an existence probe.
#[utoipa::path(get, path = "/api/users/email/{email}", tag = "Users", params(
    ("email" = String, Path, description = "Email address, matched case-insensitively")
), responses(
    (status = 200, body = Option<UserResponse>)
))]
pub async fn find_by_email(
    State(ctx): State<AppContext>,
    Path(email): Path<String>,
) -> Result<Json<Option<UserResponse>>, ApiError> {
    let repo = ctx.user_repo();
    let uc = FindUserByEmail {
        repo: repo.as_ref(),
    };
    let user = uc.execute(&email).await?;
    Ok(Json(user.map(UserResponse::from)))
}
