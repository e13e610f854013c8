use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{DefaultBodyLimit, MatchedPath};
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use repocerti_api::bootstrap::app_context::{AppContext, AppServices};
use repocerti_api::bootstrap::config::Config;
use repocerti_api::infrastructure::db;
use repocerti_api::infrastructure::db::repositories::file_repository_sqlx::SqlxFileRepository;
use repocerti_api::infrastructure::db::repositories::stats_repository_sqlx::SqlxStatsRepository;
use repocerti_api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use repocerti_api::presentation::http::{auth, error, files, health, stats, users};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            auth::login,
            auth::me,
            users::create_user,
            users::find_by_email,
            files::create_file,
            files::list_user_files,
            files::download_file,
            files::delete_file,
            files::purge_user_files,
            stats::get_stats,
            health::health,
        ),
        components(schemas(
            auth::LoginRequest,
            auth::LoginResponse,
            users::CreateUserRequest,
            users::UserResponse,
            files::CreateFileRequest,
            files::FileResponse,
            files::FileListResponse,
            stats::StatsResponse,
            health::HealthResp,
            error::ErrorBody,
            repocerti_api::domain::users::user::Role,
            repocerti_api::domain::users::user::Designation,
            repocerti_api::domain::files::file::FileKind,
            repocerti_api::domain::files::file::Signature,
            repocerti_api::domain::files::file::EmbeddedImage,
            repocerti_api::domain::files::file::CertificateContent,
            repocerti_api::domain::files::file::FileContent,
        )),
        tags(
            (name = "Auth", description = "Authentication"),
            (name = "Users", description = "Account management"),
            (name = "Files", description = "Report and certificate repository"),
            (name = "Stats", description = "Per-user activity counters"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "repocerti_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting RepoCerti backend");

    // Database
    let pool = db::connect_pool(&cfg.database_url).await?;
    db::migrate(&pool).await?;

    let user_repo = Arc::new(SqlxUserRepository::new(pool.clone()));
    let file_repo = Arc::new(SqlxFileRepository::new(pool.clone()));
    let stats_repo = Arc::new(SqlxStatsRepository::new(pool.clone()));

    if cfg.seed_demo_users {
        db::seed::seed_demo_users(user_repo.as_ref()).await?;
    }

    let services = AppServices::new(user_repo, file_repo, stats_repo);
    let ctx = AppContext::new(cfg.clone(), services);

    // Build CORS
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ];
    let headers = [http::header::CONTENT_TYPE, http::header::AUTHORIZATION];
    let cors = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
        _ if cfg.is_production => {
            // FRONTEND_URL is mandatory in production (enforced in Config),
            // so this arm only exists for an unparsable value: deny all.
            CorsLayer::new()
                .allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
                .allow_methods(methods)
                .allow_headers(headers)
        }
        // Development convenience
        _ => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
    };

    // Build API router
    let mut app = Router::new()
        .nest("/api", health::routes(pool.clone()))
        .nest("/api/auth", auth::routes(ctx.clone()))
        .nest("/api", users::routes(ctx.clone()))
        .nest("/api", files::routes(ctx.clone()))
        .nest("/api", stats::routes(ctx.clone()))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        // Report payloads inline base64 certificate images
        .layer(DefaultBodyLimit::max(cfg.body_max_bytes))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    // Optionally serve the built SPA next to the API, with the usual
    // index.html fallback for client-side routes
    if let Some(dir) = cfg.static_dir.clone() {
        let index = std::path::Path::new(&dir).join("index.html");
        app = app.fallback_service(ServeDir::new(&dir).not_found_service(ServeFile::new(index)));
    }

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
