//! Application State
//!
//! Shared state for the salegate API service: the injected store and
//! token verifier, plus the core operation structs built over them.

use chrono::{DateTime, Utc};
use salegate_core::{
    BatchAggregator, ProofResolver, SaleManager, WhitelistAdmin, WhitelistStore,
};
use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::rate_limit::{RateLimitConfig, RateLimiter};

/// Service configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub service_name: String,
    pub version: String,
    pub listen_addr: String,
    pub enable_cors: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            service_name: "salegate-api".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            listen_addr: "0.0.0.0:3000".to_string(),
            enable_cors: true,
        }
    }
}

impl ApiConfig {
    /// Override the listen address via `SALEGATE_LISTEN_ADDR`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(addr) = std::env::var("SALEGATE_LISTEN_ADDR") {
            config.listen_addr = addr;
        }
        config
    }
}

/// State shared across handlers.
pub struct AppState {
    pub config: ApiConfig,
    pub verifier: Arc<dyn TokenVerifier>,
    pub admin: WhitelistAdmin,
    pub sales: SaleManager,
    pub batches: BatchAggregator,
    pub resolver: ProofResolver,
    pub rate_limiter: RateLimiter,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Build state over an injected store and verifier with default
    /// configuration.
    pub fn new(store: Arc<dyn WhitelistStore>, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self::with_config(
            ApiConfig::default(),
            RateLimitConfig::default(),
            store,
            verifier,
        )
    }

    pub fn with_config(
        config: ApiConfig,
        rate_limit: RateLimitConfig,
        store: Arc<dyn WhitelistStore>,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            config,
            verifier,
            admin: WhitelistAdmin::new(store.clone()),
            sales: SaleManager::new(store.clone()),
            batches: BatchAggregator::new(store.clone()),
            resolver: ProofResolver::new(store),
            rate_limiter: RateLimiter::new(rate_limit),
            started_at: Utc::now(),
        }
    }

    /// Service uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u64
    }
}
