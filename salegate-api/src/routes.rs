//! API Routes
//!
//! Admin routes sit behind the bearer-token middleware; client routes
//! sit behind the rate limiter. Everything is traced.

use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::admin_auth_middleware;
use crate::handlers;
use crate::rate_limit::rate_limit_middleware;
use crate::state::AppState;

/// Build the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let admin = Router::new()
        .route(
            "/whitelist/:batch/:whitelist",
            put(handlers::set_whitelist).delete(handlers::delete_whitelist),
        )
        .route(
            "/address/:batch/:whitelist",
            put(handlers::add_addresses).delete(handlers::remove_addresses),
        )
        .route("/sale", put(handlers::set_sale))
        .route("/batch", get(handlers::get_batch_summary))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ));

    let client = Router::new()
        .route("/proof/:address", get(handlers::get_proof))
        .route("/sale", get(handlers::get_sale))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .nest("/admin", admin)
        .nest("/client", client)
        .with_state(state.clone());

    if state.config.enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router.layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenVerifier;
    use crate::rate_limit::RateLimitConfig;
    use crate::state::ApiConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use salegate_core::MemoryStore;
    use tower::util::ServiceExt;

    fn test_app() -> Router {
        let state = AppState::with_config(
            ApiConfig::default(),
            RateLimitConfig::disabled(),
            Arc::new(MemoryStore::new()),
            Arc::new(StaticTokenVerifier::new(vec!["test-token".to_string()])),
        );
        create_router(Arc::new(state))
    }

    #[tokio::test]
    async fn health_endpoint_is_public() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn admin_routes_require_a_token() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/admin/batch")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_routes_reject_bad_tokens() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/admin/batch")
                    .header("authorization", "Bearer wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn client_sale_is_404_until_configured() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/client/sale")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
