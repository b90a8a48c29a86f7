//! Service entrypoint
//!
//! Wires the store backend (sled when `SALEGATE_DATA_DIR` is set,
//! in-memory otherwise), the token verifier and the router, then
//! serves until shutdown.

use salegate_core::{MemoryStore, SledStore, WhitelistStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use salegate_api::{
    create_router, ApiConfig, AppState, RateLimitConfig, StaticTokenVerifier,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();

    let store: Arc<dyn WhitelistStore> = match std::env::var("SALEGATE_DATA_DIR") {
        Ok(dir) => {
            info!(data_dir = %dir, "using sled store");
            Arc::new(SledStore::open(&dir)?)
        }
        Err(_) => {
            warn!("SALEGATE_DATA_DIR not set, falling back to in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let verifier = Arc::new(StaticTokenVerifier::from_env());

    let state = Arc::new(AppState::with_config(
        config.clone(),
        RateLimitConfig::from_env(),
        store,
        verifier,
    ));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "salegate api listening");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
