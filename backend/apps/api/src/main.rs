//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use session::domain::repository::RefreshTokenRepository;
use session::{PgSessionRepository, SessionConfig, session_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,session=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: remove expired refresh token records
    // Errors here should not prevent server startup
    let store_for_cleanup = PgSessionRepository::new(pool.clone());
    match store_for_cleanup.cleanup_expired().await {
        Ok(deleted) => {
            tracing::info!(tokens_deleted = deleted, "Refresh token cleanup completed");
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Refresh token cleanup failed, continuing anyway"
            );
        }
    }

    // Session configuration
    let session_config = if cfg!(debug_assertions) {
        SessionConfig::development()
    } else {
        // In production, load the signing secret from environment
        let secret_b64 =
            env::var("SESSION_JWT_SECRET").expect("SESSION_JWT_SECRET must be set in production");
        let jwt_secret = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        anyhow::ensure!(
            jwt_secret.len() >= 32,
            "SESSION_JWT_SECRET must decode to at least 32 bytes"
        );

        let password_pepper = match env::var("PASSWORD_PEPPER") {
            Ok(pepper_b64) => Some(Engine::decode(&general_purpose::STANDARD, &pepper_b64)?),
            Err(_) => None,
        };

        SessionConfig {
            access_token_ttl: ttl_from_env("ACCESS_TOKEN_TTL_SECS", 15 * 60),
            refresh_token_ttl: ttl_from_env("REFRESH_TOKEN_TTL_SECS", 7 * 24 * 3600),
            reset_token_ttl: ttl_from_env("RESET_TOKEN_TTL_SECS", 3600),
            password_pepper,
            ..SessionConfig::with_secret(jwt_secret)
        }
    };

    let session_store = PgSessionRepository::new(pool.clone());

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/auth", session_router(session_store, session_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 31113));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Read a TTL override from the environment, in whole seconds
fn ttl_from_env(key: &str, default_secs: u64) -> Duration {
    let secs = env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default_secs);
    Duration::from_secs(secs)
}
