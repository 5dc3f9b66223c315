use std::sync::Arc;
use sqlx::{Pool, Sqlite};

use crate::authenticator::Authenticator;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub auth: Authenticator,
    pub config: Arc<Config>,
}
