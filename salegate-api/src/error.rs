//! API Error Types
//!
//! Maps core failures onto HTTP responses: validation faults are 4xx
//! client errors, not-found classes are 404, store failures are 500.
//! Invalid address lists return 422, distinct from other validation
//! faults, so tooling can tell a bad list from a malformed request.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use salegate_core::CoreError;
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;

/// API-level errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed request fields
    #[error("{message}")]
    Validation { message: String },

    /// Address list failed validation
    #[error("{message}")]
    UnprocessableEntity { message: String },

    /// Resource absent
    #[error("{message}")]
    NotFound { message: String },

    /// Missing credentials
    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    /// Credentials rejected
    #[error("forbidden: {reason}")]
    Forbidden { reason: String },

    /// Client exceeded its request quota
    #[error("rate limit exceeded")]
    TooManyRequests,

    /// Internal fault
    #[error("internal error: {message}")]
    Internal { message: String },
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::UnprocessableEntity { .. } => "UNPROCESSABLE_ENTITY",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Unauthorized { .. } => "UNAUTHORIZED",
            ApiError::Forbidden { .. } => "FORBIDDEN",
            ApiError::TooManyRequests => "RATE_LIMITED",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::InvalidAddress { .. } => ApiError::UnprocessableEntity { message },

            CoreError::InvalidIdentifier { .. }
            | CoreError::InvalidDigest
            | CoreError::InvalidSaleWindow { .. }
            | CoreError::EmptyAddressSet
            | CoreError::EmptyWhitelist { .. } => ApiError::Validation { message },

            CoreError::WhitelistNotFound { .. }
            | CoreError::BatchNotFound { .. }
            | CoreError::SaleNotConfigured
            | CoreError::AddressNotWhitelisted { .. }
            | CoreError::AddressNotInTree { .. } => ApiError::NotFound { message },

            CoreError::Store(inner) => ApiError::Internal {
                message: inner.to_string(),
            },
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => ApiError::Unauthorized {
                reason: err.to_string(),
            },
            AuthError::InvalidToken { .. } => ApiError::Forbidden {
                reason: err.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_address_maps_to_422() {
        let err: ApiError = CoreError::InvalidAddress {
            address: "0xnope".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn not_found_classes_map_to_404() {
        for core in [
            CoreError::SaleNotConfigured,
            CoreError::BatchNotFound {
                batch: "b1".to_string(),
            },
            CoreError::AddressNotWhitelisted {
                address: "0x0".to_string(),
            },
        ] {
            let err: ApiError = core.into();
            assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn validation_classes_map_to_400() {
        let err: ApiError = CoreError::InvalidSaleWindow { start: 1, end: 0 }.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn store_failures_map_to_500() {
        let err: ApiError =
            CoreError::Store(salegate_core::StoreError::Backend("down".to_string())).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn auth_errors_split_401_403() {
        let missing: ApiError = AuthError::MissingToken.into();
        assert_eq!(missing.status_code(), StatusCode::UNAUTHORIZED);

        let invalid: ApiError = AuthError::InvalidToken {
            reason: "expired".to_string(),
        }
        .into();
        assert_eq!(invalid.status_code(), StatusCode::FORBIDDEN);
    }
}
