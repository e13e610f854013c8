use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::infrastructure::db::DbPool;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    pub status: &'static str,
    pub database: &'static str,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, body = HealthResp))
)]
pub async fn health(State(pool): State<DbPool>) -> Json<HealthResp> {
    let db_ok = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&pool)
        .await
        .is_ok();
    let (status, database) = if db_ok {
        ("ok", "connected")
    } else {
        ("degraded", "unreachable")
    };
    Json(HealthResp { status, database })
}

pub fn routes(pool: DbPool) -> Router {
    Router::new().route("/health", get(health)).with_state(pool)
}
