use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Unknown email and wrong password deliberately share this variant.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Too many login attempts, try again later")]
    RateLimited,

    #[error("Registration failed: {0}")]
    Registration(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Internal(format!("Migration failed: {}", err))
    }
}

// Axum IntoResponse implementation for HTTP errors
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, body) = match self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({ "message": "Invalid credentials" }),
            ),
            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({ "message": msg }),
            ),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                serde_json::json!({ "message": "Too many login attempts, try again later" }),
            ),
            AppError::Registration(msg) => {
                tracing::error!("❌ Admin registration failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": msg }),
                )
            }
            other => {
                tracing::error!("❌ Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "message": "Server error" }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
