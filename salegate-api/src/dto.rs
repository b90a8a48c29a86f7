//! Data Transfer Objects
//!
//! Wire shapes for the HTTP layer. Field names (`tierCode`,
//! `startTimestamp`, the lowercase `tiercode` on proofs) are the
//! published API and must not drift.

use salegate_core::{
    Address, AllocationProof, BatchSummary, Sale, SaleKind, Whitelist,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Whitelist document, request and response form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhitelistDto {
    #[serde(rename = "tierCode")]
    pub tier_code: u32,
    pub allocation: u64,
    pub addresses: Vec<String>,
}

impl WhitelistDto {
    /// Validate every address; one bad entry rejects the whole list.
    pub fn into_whitelist(self) -> Result<Whitelist, ApiError> {
        let addresses = parse_addresses(&self.addresses)?;
        Ok(Whitelist::new(self.tier_code, self.allocation, addresses))
    }

    pub fn from_whitelist(whitelist: &Whitelist) -> Self {
        Self {
            tier_code: whitelist.tier_code,
            allocation: whitelist.allocation,
            addresses: whitelist
                .addresses
                .iter()
                .map(|a| a.as_str().to_string())
                .collect(),
        }
    }
}

/// Parse a raw address list, failing on the first invalid entry so no
/// partial batch ever applies.
pub fn parse_addresses(raw: &[String]) -> Result<Vec<Address>, ApiError> {
    raw.iter()
        .map(|s| Address::parse(s).map_err(ApiError::from))
        .collect()
}

/// Canonical string list, for address-set responses.
pub fn address_strings(addresses: &[Address]) -> Vec<String> {
    addresses.iter().map(|a| a.as_str().to_string()).collect()
}

/// Sale descriptor, request and response form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDto {
    #[serde(rename = "type")]
    pub kind: String,
    pub batch: String,
    #[serde(rename = "startTimestamp")]
    pub start_timestamp: u64,
    #[serde(rename = "endTimestamp")]
    pub end_timestamp: u64,
}

impl SaleDto {
    pub fn into_sale(self) -> Result<Sale, ApiError> {
        let kind: SaleKind = self.kind.parse()?;
        let batch = salegate_core::BatchId::new(self.batch)?;
        Ok(Sale::new(
            kind,
            batch,
            self.start_timestamp,
            self.end_timestamp,
        )?)
    }

    pub fn from_sale(sale: &Sale) -> Self {
        Self {
            kind: sale.kind.as_str().to_string(),
            batch: sale.batch.as_str().to_string(),
            start_timestamp: sale.start_timestamp,
            end_timestamp: sale.end_timestamp,
        }
    }
}

/// Published batch summary: parallel, index-aligned arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummaryDto {
    #[serde(rename = "tierCodes")]
    pub tier_codes: Vec<u32>,
    pub allocations: Vec<u64>,
    #[serde(rename = "merkleRoots")]
    pub merkle_roots: Vec<String>,
}

impl BatchSummaryDto {
    pub fn from_summary(summary: &BatchSummary) -> Self {
        Self {
            tier_codes: summary.tier_codes.clone(),
            allocations: summary.allocations.clone(),
            merkle_roots: summary.merkle_roots.iter().map(|d| d.to_hex()).collect(),
        }
    }
}

/// Proof response. The lowercase `tiercode` is the published wire
/// name; on-chain tooling depends on it, so don't "fix" the casing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofDto {
    pub allocation: u64,
    pub tiercode: u32,
    #[serde(rename = "whitelistIdx")]
    pub whitelist_idx: usize,
    pub proof: Vec<String>,
}

impl ProofDto {
    pub fn from_proof(proof: &AllocationProof) -> Self {
        Self {
            allocation: proof.allocation,
            tiercode: proof.tier_code,
            whitelist_idx: proof.whitelist_idx,
            proof: proof.proof.iter().map(|d| d.to_hex()).collect(),
        }
    }
}

/// Echo of the path parameters, returned by whitelist deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhitelistParamsDto {
    pub batch: String,
    pub whitelist: String,
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitelist_dto_rejects_any_invalid_address() {
        let dto = WhitelistDto {
            tier_code: 0,
            allocation: 10,
            addresses: vec![
                "0x0000000000000000000000000000000000000001".to_string(),
                "garbage".to_string(),
            ],
        };
        assert!(dto.into_whitelist().is_err());
    }

    #[test]
    fn sale_dto_rejects_unknown_kind() {
        let dto = SaleDto {
            kind: "public".to_string(),
            batch: "b1".to_string(),
            start_timestamp: 0,
            end_timestamp: 1,
        };
        assert!(dto.into_sale().is_err());
    }

    #[test]
    fn proof_dto_uses_published_field_names() {
        let proof = AllocationProof {
            allocation: 40000,
            tier_code: 2,
            whitelist_idx: 1,
            proof: vec![],
        };
        let json = serde_json::to_value(ProofDto::from_proof(&proof)).unwrap();
        assert_eq!(json["allocation"], 40000);
        assert_eq!(json["tiercode"], 2);
        assert_eq!(json["whitelistIdx"], 1);
        assert!(json["proof"].as_array().unwrap().is_empty());
    }
}
