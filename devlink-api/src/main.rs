mod app;

use app::{app_router, AppState};
use devlink_core::{PostManager, ProfileManager, UserManager};
use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone)]
struct ApiConfig {
    bind: SocketAddr,
    data_dir: PathBuf,
    /// JWT 签名密钥
    jwt_secret: String,
    /// JWT iss
    jwt_issuer: String,
    /// JWT aud
    jwt_audience: String,
    /// Token 有效期（秒）
    token_ttl: i64,
    /// CORS 允许的来源列表（空则允许所有）
    cors_origins: Vec<String>,
}

impl ApiConfig {
    fn from_env() -> Self {
        let bind = env::var("DL_BIND")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| "0.0.0.0:8080".parse().expect("valid default bind"));

        let data_dir = env::var("DL_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        // JWT 密钥；未配置时本次运行使用随机值（重启后已签发 token 失效）
        let jwt_secret = env::var("DL_JWT_SECRET").unwrap_or_else(|_| {
            info!("DL_JWT_SECRET not set; generating a random secret for this run");
            uuid::Uuid::new_v4().to_string()
        });
        let jwt_issuer = env::var("DL_JWT_ISSUER").unwrap_or_else(|_| "devlink-api".into());
        let jwt_audience = env::var("DL_JWT_AUDIENCE").unwrap_or_else(|_| "devlink-clients".into());

        let token_ttl = env::var("DL_TOKEN_TTL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600);

        // CORS 允许的来源，逗号分隔；空或 "*" 表示允许所有
        let cors_origins = env::var("DL_CORS_ORIGINS")
            .ok()
            .map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() || trimmed == "*" {
                    vec![]
                } else {
                    trimmed
                        .split(',')
                        .filter(|t| !t.trim().is_empty())
                        .map(|t| t.trim().to_string())
                        .collect()
                }
            })
            .unwrap_or_default();

        Self {
            bind,
            data_dir,
            jwt_secret,
            jwt_issuer,
            jwt_audience,
            token_ttl,
            cors_origins,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 优先读取 .env（若存在）
    let _ = dotenv();
    init_tracing();

    let config = ApiConfig::from_env();
    info!("starting API on {}", config.bind);

    let users = Arc::new(
        UserManager::new(config.data_dir.clone(), config.jwt_secret.clone())
            .with_claims_context(config.jwt_issuer.clone(), config.jwt_audience.clone())
            .with_ttl(config.token_ttl),
    );
    users.ensure_dirs().await?;

    let profiles = Arc::new(ProfileManager::new(config.data_dir.clone()));
    profiles.ensure_dirs().await?;

    let posts = Arc::new(PostManager::new(config.data_dir.clone()));
    posts.ensure_dirs().await?;

    let state = AppState {
        users,
        profiles,
        posts,
    };

    let app = app_router(state, config.cors_origins.clone());
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
