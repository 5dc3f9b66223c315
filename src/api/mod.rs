pub mod auth;
pub mod expenses;
pub mod middleware;
pub mod state;

pub use middleware::RateLimiter;
pub use state::AppState;

use axum::{
    extract::Request,
    middleware::{self as axum_middleware, Next},
    routing::{delete, get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

pub fn create_router(state: AppState, rate_limiter: Arc<RateLimiter>) -> Router {
    let login = Router::new()
        .route("/login", post(auth::login))
        .route_layer(axum_middleware::from_fn(move |req: Request, next: Next| {
            let limiter = rate_limiter.clone();
            middleware::login_rate_limit(limiter, req, next)
        }));

    let authenticated = Router::new()
        .route("/session", get(auth::session))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        .route("/api/health", get(health))
        .merge(login)
        .route("/register-admin", post(auth::register_admin))
        .route(
            "/expenses",
            get(expenses::list_expenses).post(expenses::create_expense),
        )
        .route("/expenses/:id", delete(expenses::delete_expense))
        .merge(authenticated)
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
