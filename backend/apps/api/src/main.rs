//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use auth::middleware::{AuthGateState, require_session};
use auth::{AuthConfig, PgUserRepository, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
};
use platform::logging::{RequestLog, access_log};
use prompt::config::DEFAULT_GENERATION_ENDPOINT;
use prompt::{GeminiClient, PromptConfig, prompt_router};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
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
                .unwrap_or_else(|_| "api=info,auth=info,prompt=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    // Bound every statement so a stuck store turns into an error
    // instead of a hanging request
    let connect_options = database_url
        .parse::<PgConnectOptions>()?
        .options([("statement_timeout", "5000")]);

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(connect_options)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Request log (one tagged file per day)
    let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
    let request_log = RequestLog::open(&log_dir)?;
    tracing::info!(dir = %log_dir, "Request log opened");

    // Auth configuration
    let mut auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        AuthConfig::default()
    };
    if let Ok(secure) = env::var("SESSION_COOKIE_SECURE") {
        auth_config.cookie_secure = secure.trim().eq_ignore_ascii_case("true");
    }

    // Prompt configuration
    let prompt_config = PromptConfig {
        endpoint: env::var("GENERATION_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_GENERATION_ENDPOINT.to_string()),
        api_key: env::var("GOOGLE_API_KEY").ok(),
        ..PromptConfig::default()
    };
    if prompt_config.api_key.is_none() {
        tracing::warn!("GOOGLE_API_KEY is not set; prompt requests will fail");
    }

    let auth_repo = PgUserRepository::new(pool.clone());

    let gate_state = AuthGateState {
        repo: Arc::new(auth_repo.clone()),
        config: Arc::new(auth_config.clone()),
    };

    // Only the prompt route sits behind the session gate
    let protected = prompt_router(GeminiClient::new(prompt_config)?).layer(
        middleware::from_fn_with_state(gate_state, require_session::<PgUserRepository>),
    );

    // CORS configuration
    let frontend_origin =
        env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());

    let cors = CorsLayer::new()
        .allow_origin(frontend_origin.parse::<http::HeaderValue>()?)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .merge(auth_router(auth_repo, auth_config))
        .merge(protected)
        .layer(middleware::from_fn_with_state(
            request_log.clone(),
            access_log,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
