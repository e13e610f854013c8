use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_port: u16,
    pub frontend_url: Option<String>,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expires_secs: i64,
    pub body_max_bytes: usize,
    pub static_dir: Option<String>,
    pub seed_demo_users: bool,
    pub is_production: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3002);
        let frontend_url = env::var("FRONTEND_URL").ok();
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://repocerti.db".into());
        let jwt_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| "development-secret-change-me".into());
        let jwt_expires_secs = env::var("JWT_EXPIRES_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60 * 60);
        // Generous default; report payloads inline base64 images.
        let body_max_bytes = env::var("BODY_MAX_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(50 * 1024 * 1024);
        let static_dir = env::var("STATIC_DIR").ok().and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        });
        let seed_demo_users = env::var("SEED_DEMO_USERS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(true);
        let is_production = matches!(
            env::var("RUST_ENV").ok().as_deref(),
            Some("production") | Some("prod")
        );

        // Production hardening: require a proper FRONTEND_URL and a robust secret
        if is_production {
            if !frontend_url
                .as_deref()
                .map(|u| u.starts_with("http"))
                .unwrap_or(false)
            {
                anyhow::bail!(
                    "FRONTEND_URL must be set to a full origin in production (e.g., https://app.example.com)"
                );
            }
            if jwt_secret == "development-secret-change-me" || jwt_secret.len() < 16 {
                anyhow::bail!("JWT_SECRET must be set to a strong secret in production");
            }
        }

        Ok(Self {
            api_port,
            frontend_url,
            database_url,
            jwt_secret,
            jwt_expires_secs,
            body_max_bytes,
            static_dir,
            seed_demo_users,
            is_production,
        })
    }
}
