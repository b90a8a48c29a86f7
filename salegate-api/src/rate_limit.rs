//! Client rate limiting
//!
//! Fixed-window per-IP limiter on the public proof/sale routes. Kept
//! in process memory: the quota resets on restart, which is acceptable
//! for an abuse brake.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Requests allowed per window, per client.
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 60,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    /// Read limits from `SALEGATE_RATE_LIMIT_ENABLED` and
    /// `SALEGATE_RATE_LIMIT_PER_MINUTE`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let enabled = std::env::var("SALEGATE_RATE_LIMIT_ENABLED")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(defaults.enabled);
        let max_requests = std::env::var("SALEGATE_RATE_LIMIT_PER_MINUTE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_requests);
        Self {
            enabled,
            max_requests,
            window: defaults.window,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Fixed-window counters keyed by client identity.
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: RwLock<HashMap<String, (Instant, u32)>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: RwLock::new(HashMap::new()),
        }
    }

    /// Record one request for `key`. Returns false once the window's
    /// quota is spent.
    pub async fn try_acquire(&self, key: &str) -> bool {
        if !self.config.enabled {
            return true;
        }

        let now = Instant::now();
        let mut windows = self.windows.write().await;

        // expired windows would never be read again; keep the map bounded
        windows.retain(|_, (start, _)| now.duration_since(*start) < self.config.window);

        let entry = windows.entry(key.to_string()).or_insert((now, 0));
        if now.duration_since(entry.0) >= self.config.window {
            *entry = (now, 0);
        }

        if entry.1 >= self.config.max_requests {
            return false;
        }
        entry.1 += 1;
        true
    }
}

/// Middleware applied to the client routes.
pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let key = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        // no connect info (e.g. in-process tests): one shared bucket
        .unwrap_or_else(|| "unknown".to_string());

    if !state.rate_limiter.try_acquire(&key).await {
        warn!(client = %key, "client rate limit exceeded");
        return ApiError::TooManyRequests.into_response();
    }

    next.run(request).await
}
