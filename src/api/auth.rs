use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::authenticator::AuthenticatedUser;
use crate::crypto::Claims;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterAdminRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthenticatedUser>, AppError> {
    let user = state.auth.login(req.email.trim(), &req.password).await?;
    Ok(Json(user))
}

/// POST /register-admin
pub async fn register_admin(
    State(state): State<AppState>,
    Json(req): Json<RegisterAdminRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .auth
        .register_admin(&req.name, req.email.trim(), &req.password, req.role.as_deref())
        .await
        .map_err(|e| AppError::Registration(e.to_string()))?;

    Ok(Json(MessageResponse {
        message: "Admin registered successfully".to_string(),
    }))
}

/// GET /session (requires auth via middleware)
pub async fn session(Extension(claims): Extension<Claims>) -> Json<Claims> {
    Json(claims)
}
