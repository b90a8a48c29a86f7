//! Authentication
//!
//! Administrative routes require a bearer token checked by an injected
//! [`TokenVerifier`]; the verifier is a collaborator, not something
//! this service implements. A missing or malformed header is 401, a
//! token the verifier rejects is 403.
//!
//! [`StaticTokenVerifier`] is the bundled implementation: a fixed
//! token list from configuration, enough for deployments that
//! provision operator tokens out of band.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated identity attached to a verified token.
#[derive(Debug, Clone)]
pub struct Principal {
    pub subject: String,
}

/// Token verification failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("no bearer token")]
    MissingToken,

    #[error("token rejected: {reason}")]
    InvalidToken { reason: String },
}

/// Identity-token verifier collaborator.
#[async_trait::async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Principal, AuthError>;
}

/// Verifier backed by a static token list.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
    tokens: Vec<String>,
}

impl StaticTokenVerifier {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// Read the token list from `SALEGATE_ADMIN_TOKENS`
    /// (comma-separated). An unset variable means no token is ever
    /// accepted.
    pub fn from_env() -> Self {
        let tokens = std::env::var("SALEGATE_ADMIN_TOKENS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Self { tokens }
    }
}

#[async_trait::async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        if self.tokens.iter().any(|t| t == token) {
            Ok(Principal {
                subject: "admin".to_string(),
            })
        } else {
            Err(AuthError::InvalidToken {
                reason: "unknown token".to_string(),
            })
        }
    }
}

/// Middleware guarding the admin routes. Runs before any core logic.
pub async fn admin_auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let bearer = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "));

    let Some(token) = bearer else {
        return ApiError::from(AuthError::MissingToken).into_response();
    };

    match state.verifier.verify(token).await {
        Ok(principal) => {
            debug!(subject = %principal.subject, "admin request authorized");
            next.run(request).await
        }
        Err(err) => {
            warn!(%err, "admin token rejected");
            ApiError::from(err).into_response()
        }
    }
}
