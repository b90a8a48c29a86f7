//! API Handlers
//!
//! Thin translation layer between HTTP and the core operations: parse
//! and validate inputs, call the op, map the result to a DTO. All
//! domain rules live in `salegate-core`.

use axum::{
    extract::{Path, State},
    Json,
};
use salegate_core::{Address, BatchId, WhitelistId};
use std::sync::Arc;
use tracing::debug;

use crate::dto::*;
use crate::error::ApiResult;
use crate::state::AppState;

/// Liveness probe.
pub async fn health(State(state): State<Arc<AppState>>) -> ApiResult<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.config.version.clone(),
        uptime_secs: state.uptime_secs(),
    }))
}

// ============================================
// Admin handlers
// ============================================

/// `PUT /admin/whitelist/:batch/:whitelist` — wholesale replace.
pub async fn set_whitelist(
    State(state): State<Arc<AppState>>,
    Path((batch, whitelist)): Path<(String, String)>,
    Json(body): Json<WhitelistDto>,
) -> ApiResult<Json<WhitelistDto>> {
    let batch = BatchId::new(batch)?;
    let id = WhitelistId::new(whitelist)?;
    let document = body.into_whitelist()?;

    let stored = state.admin.set_whitelist(&batch, &id, document).await?;
    Ok(Json(WhitelistDto::from_whitelist(&stored)))
}

/// `DELETE /admin/whitelist/:batch/:whitelist`
pub async fn delete_whitelist(
    State(state): State<Arc<AppState>>,
    Path((batch, whitelist)): Path<(String, String)>,
) -> ApiResult<Json<WhitelistParamsDto>> {
    let batch_id = BatchId::new(batch.clone())?;
    let id = WhitelistId::new(whitelist.clone())?;

    state.admin.delete_whitelist(&batch_id, &id).await?;
    Ok(Json(WhitelistParamsDto { batch, whitelist }))
}

/// `PUT /admin/address/:batch/:whitelist` — set union.
pub async fn add_addresses(
    State(state): State<Arc<AppState>>,
    Path((batch, whitelist)): Path<(String, String)>,
    Json(body): Json<Vec<String>>,
) -> ApiResult<Json<Vec<String>>> {
    let batch = BatchId::new(batch)?;
    let id = WhitelistId::new(whitelist)?;
    let additions = parse_addresses(&body)?;

    let updated = state.admin.add_addresses(&batch, &id, additions).await?;
    Ok(Json(address_strings(&updated)))
}

/// `DELETE /admin/address/:batch/:whitelist` — set difference.
pub async fn remove_addresses(
    State(state): State<Arc<AppState>>,
    Path((batch, whitelist)): Path<(String, String)>,
    Json(body): Json<Vec<String>>,
) -> ApiResult<Json<Vec<String>>> {
    let batch = BatchId::new(batch)?;
    let id = WhitelistId::new(whitelist)?;
    let removals = parse_addresses(&body)?;

    let updated = state.admin.remove_addresses(&batch, &id, removals).await?;
    Ok(Json(address_strings(&updated)))
}

/// `PUT /admin/sale` — replace the active sale.
pub async fn set_sale(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SaleDto>,
) -> ApiResult<Json<SaleDto>> {
    let sale = body.into_sale()?;
    let stored = state.sales.set_sale(sale).await?;
    Ok(Json(SaleDto::from_sale(&stored)))
}

/// `GET /admin/batch` — summary of the active sale's batch.
pub async fn get_batch_summary(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BatchSummaryDto>> {
    let sale = state.sales.get_sale().await?;
    let summary = state.batches.summarize(&sale.batch).await?;
    Ok(Json(BatchSummaryDto::from_summary(&summary)))
}

// ============================================
// Client handlers
// ============================================

/// `GET /client/proof/:address` — allocation proof for one address.
pub async fn get_proof(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult<Json<ProofDto>> {
    let address = Address::parse(&address)?;
    let sale = state.sales.get_sale().await?;

    debug!(address = %address, batch = %sale.batch, "proof requested");
    let proof = state.resolver.resolve(&sale, &address).await?;
    Ok(Json(ProofDto::from_proof(&proof)))
}

/// `GET /client/sale` — the active sale descriptor.
pub async fn get_sale(State(state): State<Arc<AppState>>) -> ApiResult<Json<SaleDto>> {
    let sale = state.sales.get_sale().await?;
    Ok(Json(SaleDto::from_sale(&sale)))
}
