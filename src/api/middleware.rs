use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::api::state::AppState;
use crate::error::AppError;

/// Bearer token middleware - verifies the session token and exposes its claims
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization format".to_string()))?;

    let claims = state.auth.signer().verify(token)?;
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Fixed-window login attempt counter per client IP
#[derive(Clone)]
pub struct RateLimiter {
    // IP -> (attempts, window_start)
    attempts: Arc<Mutex<HashMap<IpAddr, (u32, Instant)>>>,
    max_attempts: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_attempts: u32, window_secs: u64) -> Self {
        Self {
            attempts: Arc::new(Mutex::new(HashMap::new())),
            max_attempts,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Count an attempt from `ip`; false once the window's budget is spent
    pub async fn check(&self, ip: IpAddr) -> bool {
        let mut attempts = self.attempts.lock().await;
        let now = Instant::now();

        let entry = attempts.entry(ip).or_insert((0, now));
        if now.duration_since(entry.1) > self.window {
            *entry = (0, now);
        }

        if entry.0 < self.max_attempts {
            entry.0 += 1;
            true
        } else {
            false
        }
    }

    /// Drop entries whose window ended a while ago
    pub async fn cleanup(&self) {
        let mut attempts = self.attempts.lock().await;
        let now = Instant::now();
        attempts.retain(|_, (_, start)| now.duration_since(*start) <= self.window * 2);
    }

    pub async fn tracked_clients(&self) -> usize {
        self.attempts.lock().await.len()
    }
}

pub async fn login_rate_limit(
    limiter: Arc<RateLimiter>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

    if !limiter.check(ip).await {
        tracing::warn!("Login rate limit hit for {}", ip);
        return Err(AppError::RateLimited);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_limit_per_ip() {
        let limiter = RateLimiter::new(2, 60);
        let a = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
        let b = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));

        assert!(limiter.check(a).await);
        assert!(limiter.check(a).await);
        assert!(!limiter.check(a).await);
        assert!(limiter.check(b).await);
    }

    #[tokio::test]
    async fn test_window_resets() {
        let limiter = RateLimiter::new(1, 0);
        let ip = IpAddr::V4(Ipv4Addr::LOCALHOST);

        assert!(limiter.check(ip).await);
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(limiter.check(ip).await);
    }

    #[tokio::test]
    async fn test_cleanup_drops_stale_entries() {
        let limiter = RateLimiter::new(5, 0);
        limiter.check(IpAddr::V4(Ipv4Addr::LOCALHOST)).await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        limiter.cleanup().await;
        assert_eq!(limiter.tracked_clients().await, 0);
    }
}
