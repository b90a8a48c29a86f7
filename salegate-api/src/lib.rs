//! Salegate API
//!
//! HTTP surface for the whitelist/proof core: administrative whitelist
//! and sale management behind bearer-token auth, public proof and sale
//! reads behind a per-IP rate limiter.

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod rate_limit;
pub mod routes;
pub mod state;

pub use auth::{AuthError, Principal, StaticTokenVerifier, TokenVerifier};
pub use error::{ApiError, ApiResult};
pub use rate_limit::{RateLimitConfig, RateLimiter};
pub use routes::create_router;
pub use state::{ApiConfig, AppState};
