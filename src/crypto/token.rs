use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Session tokens are valid for one day from issuance.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies HS256 session tokens with the server-held secret
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, id: &str, role: &str) -> Result<String, AppError> {
        self.issue_at(id, role, chrono::Utc::now().timestamp())
    }

    /// Issue a token as if it had been created at `issued_at` (unix seconds)
    pub fn issue_at(&self, id: &str, role: &str, issued_at: i64) -> Result<String, AppError> {
        let claims = Claims {
            id: id.to_string(),
            role: role.to_string(),
            iat: issued_at,
            exp: issued_at + TOKEN_TTL_SECS,
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Crypto(format!("Token signing failed: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| AppError::Unauthorized(format!("Invalid or expired token: {}", e)))?;

        Ok(data.claims)
    }
}
