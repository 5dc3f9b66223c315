use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use school_portal::{
    api::{create_router, AppState, RateLimiter},
    authenticator::Authenticator,
    config::Config,
    crypto::TokenSigner,
    error::AppError,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,school_portal=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 Starting school portal v{}...", env!("CARGO_PKG_VERSION"));

    let config = Arc::new(Config::from_env()?);
    tracing::info!("✅ Configuration loaded");

    if config.allow_default_password {
        tracing::warn!("⚠️  Accounts without a password accept the default password");
    }

    let db = school_portal::db::connect(&config).await?;
    tracing::info!("✅ Database ready: {}", config.database_url);

    let auth = Authenticator::new(
        db.clone(),
        TokenSigner::new(&config.jwt_secret),
        config.allow_default_password,
    );

    if let Some(admin) = &config.bootstrap_admin {
        auth.ensure_admin(&admin.name, &admin.email, &admin.password).await?;
    }

    let rate_limiter = Arc::new(RateLimiter::new(
        config.login_rate_limit,
        config.login_rate_window_secs,
    ));
    tracing::info!(
        "✅ Login rate limit: {} attempts per {}s per IP",
        config.login_rate_limit,
        config.login_rate_window_secs
    );

    // Spawn background task for rate limiter cleanup
    {
        let limiter = rate_limiter.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(300)); // Every 5 minutes
            loop {
                interval.tick().await;
                limiter.cleanup().await;
                tracing::debug!("🧹 Rate limiter cache cleaned up");
            }
        });
    }

    let state = AppState {
        db,
        auth,
        config: config.clone(),
    };
    let app = create_router(state, rate_limiter);

    let addr = config.server_address();
    tracing::info!("🌐 Server listening on http://{}", addr);
    tracing::info!("  POST   /login          - Sign in (system user, teacher or student)");
    tracing::info!("  POST   /register-admin - Create a system user");
    tracing::info!("  GET    /expenses       - List expenses");
    tracing::info!("  POST   /expenses       - Record an expense");
    tracing::info!("  DELETE /expenses/:id   - Delete an expense");
    tracing::info!("  GET    /session        - Current token claims (requires auth)");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
