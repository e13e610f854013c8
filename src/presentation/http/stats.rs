use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::ports::stats_repository::StatsRow;
use crate::application::use_cases::stats::get_stats::GetUserStats;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{Bearer, require_user_id};
use crate::presentation::http::error::ApiError;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub user_id: Uuid,
    pub generated: i64,
    pub downloaded: i64,
    pub last_activity: chrono::DateTime<chrono::Utc>,
}

impl From<StatsRow> for StatsResponse {
    fn from(row: StatsRow) -> Self {
        StatsResponse {
            user_id: row.user_id,
            generated: row.generated,
            downloaded: row.downloaded,
            last_activity: row.last_activity,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/stats/:user_id", get(get_stats))
        .with_state(ctx)
}

/// Users who never generated or downloaded anything get a zeroed row
/// stamped with the current time instead of a 404.
#[utoipa::path(get, path = "/api/stats/{user_id}", tag = "Stats", params(
    ("user_id" = Uuid, Path,)
), responses(
    (status = 200, body = StatsResponse),
    (status = 403, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn get_stats(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(user_id): Path<Uuid>,
) -> Result<Json<StatsResponse>, ApiError> {
    let caller = require_user_id(&ctx.cfg, bearer)?;
    if caller != user_id {
        return Err(ApiError::Forbidden(
            "Cannot access another user's activity.".into(),
        ));
    }
    let stats = ctx.stats_repo();
    let uc = GetUserStats {
        stats: stats.as_ref(),
    };
    let row = uc.execute(user_id).await?;
    Ok(Json(row.map(StatsResponse::from).unwrap_or_else(|| {
        StatsResponse {
            user_id,
            generated: 0,
            downloaded: 0,
            last_activity: chrono::Utc::now(),
        }
    })))
}
