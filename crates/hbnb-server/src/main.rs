// HBnB API server
// Decision: PostgreSQL when DATABASE_URL is set, in-memory store otherwise

use anyhow::{Context, Result};
use hbnb_core::telemetry::{init_telemetry, TelemetryConfig};
use hbnb_server::{
    auth::AuthConfig, build_app, config::ServerConfig, storage::StorageBackend, AppState,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Configure via RUST_LOG / LOG_LEVEL (default: "hbnb_server=debug,tower_http=debug")
    let mut telemetry_config = TelemetryConfig::from_env();
    if telemetry_config.service_name == "hbnb" {
        telemetry_config.service_name = "hbnb-server".to_string();
    }
    if telemetry_config.log_filter.is_none() {
        telemetry_config.log_filter = Some("hbnb_server=debug,tower_http=debug".to_string());
    }
    telemetry_config.service_version = Some(env!("CARGO_PKG_VERSION").to_string());
    init_telemetry(telemetry_config);

    tracing::info!("hbnb-server starting...");

    let config = ServerConfig::from_env();

    let db = match &config.database_url {
        Some(url) => StorageBackend::postgres(url)
            .await
            .context("Failed to connect to database")?,
        None => StorageBackend::in_memory(),
    };
    db.migrate().await?;

    if db.is_dev_mode() {
        tracing::warn!("DATABASE_URL not set, using in-memory storage (data is lost on restart)");
    } else {
        tracing::info!("Connected to database, migrations applied");
    }

    let auth_config = AuthConfig::from_env();
    tracing::info!(
        access_token_lifetime_secs = auth_config.jwt.access_token_lifetime.as_secs(),
        signup_disabled = auth_config.disable_signup,
        admin_bootstrap = auth_config.admin.is_some(),
        "Authentication configured"
    );

    let state = AppState::new(auth_config.clone(), Arc::new(db));

    if let Some(admin) = &auth_config.admin {
        let user = state
            .facade
            .users
            .ensure_admin(&admin.email, &admin.password)
            .await
            .context("Failed to bootstrap admin user")?;
        tracing::info!(user_id = %user.id, email = %user.email, "Admin user ready");
    }

    if config.api_prefix.is_empty() {
        tracing::info!("API mounted at the root");
    } else {
        tracing::info!(prefix = %config.api_prefix, "API prefix configured");
    }
    if config.cors_allowed_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?config.cors_allowed_origins, "CORS origins configured");
    }

    let app = build_app(state, &config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    tracing::info!("HTTP server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
