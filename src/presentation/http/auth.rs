use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::me::GetMe;
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::users::UserResponse;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/me", get(me))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/auth/login", tag = "Auth", request_body = LoginRequest, responses(
    (status = 200, body = LoginResponse),
    (status = 401, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let repo = ctx.user_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        email: req.email,
        password: req.password,
    };
    let user = uc
        .execute(&dto)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password.".into()))?;
    let token = issue_token(&ctx.cfg, user.id)?;
    Ok(Json(LoginResponse {
        access_token: token,
        user: user.into(),
    }))
}

#[utoipa::path(get, path = "/api/auth/me", tag = "Auth", responses(
    (status = 200, body = UserResponse),
    (status = 401, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn me(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<UserResponse>, ApiError> {
    let caller = require_user_id(&ctx.cfg, bearer)?;
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(caller)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found".into()))?;
    Ok(Json(user.into()))
}

// --- Bearer extractor & JWT utils ---
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth) = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(t) = auth.strip_prefix("Bearer ") {
                return Ok(Bearer(t.to_string()));
            }
        }
        Err(ApiError::Unauthorized(
            "Missing or invalid authorization token.".into(),
        ))
    }
}

fn issue_token(cfg: &Config, user_id: Uuid) -> Result<String, ApiError> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + (cfg.jwt_expires_secs as usize),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Decodes the bearer token and yields the caller's user id.
pub(crate) fn require_user_id(cfg: &Config, bearer: Bearer) -> Result<Uuid, ApiError> {
    let data = jsonwebtoken::decode::<Claims>(
        &bearer.0,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Unauthorized("Missing or invalid authorization token.".into()))?;
    Uuid::parse_str(&data.claims.sub)
        .map_err(|_| ApiError::Unauthorized("Missing or invalid authorization token.".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::config::Config;

    fn test_config() -> Config {
        Config {
            api_port: 0,
            frontend_url: None,
            database_url: "sqlite::memory:".into(),
            jwt_secret: "test-secret".into(),
            jwt_expires_secs: 3600,
            body_max_bytes: 1024,
            static_dir: None,
            seed_demo_users: false,
            is_production: false,
        }
    }

    #[test]
    fn issued_tokens_validate_back_to_the_user() {
        let cfg = test_config();
        let id = Uuid::new_v4();
        let token = issue_token(&cfg, id).unwrap();
        let back = require_user_id(&cfg, Bearer(token)).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn tokens_from_another_secret_are_rejected() {
        let cfg = test_config();
        let mut other = test_config();
        other.jwt_secret = "different".into();
        let token = issue_token(&other, Uuid::new_v4()).unwrap();
        assert!(require_user_id(&cfg, Bearer(token)).is_err());
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let cfg = test_config();
        assert!(require_user_id(&cfg, Bearer("not-a-jwt".into())).is_err());
    }
}
