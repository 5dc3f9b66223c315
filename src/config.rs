use crate::error::AppError;

#[derive(Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    /// Accept the fixed fallback password for accounts that never had one set.
    pub allow_default_password: bool,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub request_timeout_secs: u64,
    pub login_rate_limit: u32,
    pub login_rate_window_secs: u64,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// First system user to create at startup when it doesn't exist yet.
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = var("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Config("JWT_SECRET must be set".to_string()))?;

        let bootstrap_admin = match (var("BOOTSTRAP_ADMIN_EMAIL"), var("BOOTSTRAP_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(BootstrapAdmin {
                name: var("BOOTSTRAP_ADMIN_NAME").unwrap_or_else(|| "Administrator".to_string()),
                email,
                password,
            }),
            _ => None,
        };

        let login_rate_limit: u32 = parse_var(&var, "LOGIN_RATE_LIMIT", 20)?;
        if login_rate_limit == 0 {
            return Err(AppError::Config(
                "LOGIN_RATE_LIMIT must be at least 1".to_string(),
            ));
        }

        Ok(Config {
            server_host: var("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            server_port: parse_var(&var, "SERVER_PORT", 5000)?,
            database_url: var("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://school_portal.db".to_string()),
            jwt_secret,
            allow_default_password: parse_var(&var, "ALLOW_DEFAULT_PASSWORD", true)?,
            db_max_connections: parse_var(&var, "DB_MAX_CONNECTIONS", 20)?,
            db_min_connections: parse_var(&var, "DB_MIN_CONNECTIONS", 5)?,
            request_timeout_secs: parse_var(&var, "REQUEST_TIMEOUT_SECS", 30)?,
            login_rate_limit,
            login_rate_window_secs: parse_var(&var, "LOGIN_RATE_WINDOW_SECS", 60)?,
            bootstrap_admin,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<F, T>(var: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {}: {}", key, e))),
        None => Ok(default),
    }
}
