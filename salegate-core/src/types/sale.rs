//! Sale descriptor
//!
//! A single process-wide sale record points clients at the whitelist
//! batch that is currently live. Exactly one sale exists at a time; it
//! is replaced wholesale by the admin and read by clients.

use crate::error::{CoreError, CoreResult};
use crate::types::whitelist::BatchId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sale classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SaleKind {
    PreSale,
    FirstCome,
    Allowlist,
}

impl SaleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleKind::PreSale => "pre-sale",
            SaleKind::FirstCome => "first-come",
            SaleKind::Allowlist => "allowlist",
        }
    }
}

impl FromStr for SaleKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre-sale" => Ok(SaleKind::PreSale),
            "first-come" => Ok(SaleKind::FirstCome),
            "allowlist" => Ok(SaleKind::Allowlist),
            other => Err(CoreError::InvalidIdentifier {
                kind: "sale type",
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for SaleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The active sale: type, batch reference and time window (unix seconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    #[serde(rename = "type")]
    pub kind: SaleKind,
    pub batch: BatchId,
    #[serde(rename = "startTimestamp")]
    pub start_timestamp: u64,
    #[serde(rename = "endTimestamp")]
    pub end_timestamp: u64,
}

impl Sale {
    /// Build a sale descriptor, rejecting inverted time windows.
    pub fn new(
        kind: SaleKind,
        batch: BatchId,
        start_timestamp: u64,
        end_timestamp: u64,
    ) -> CoreResult<Self> {
        let sale = Self {
            kind,
            batch,
            start_timestamp,
            end_timestamp,
        };
        sale.validate()?;
        Ok(sale)
    }

    /// `end_timestamp >= start_timestamp` must hold.
    pub fn validate(&self) -> CoreResult<()> {
        if self.end_timestamp < self.start_timestamp {
            return Err(CoreError::InvalidSaleWindow {
                start: self.start_timestamp,
                end: self.end_timestamp,
            });
        }
        Ok(())
    }

    /// Whether the window contains the given unix timestamp.
    pub fn is_open_at(&self, unix_ts: u64) -> bool {
        self.start_timestamp <= unix_ts && unix_ts <= self.end_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(id: &str) -> BatchId {
        BatchId::new(id).unwrap()
    }

    #[test]
    fn kind_round_trips_through_wire_names() {
        for (kind, name) in [
            (SaleKind::PreSale, "\"pre-sale\""),
            (SaleKind::FirstCome, "\"first-come\""),
            (SaleKind::Allowlist, "\"allowlist\""),
        ] {
            assert_eq!(serde_json::to_string(&kind).unwrap(), name);
            let parsed: SaleKind = serde_json::from_str(name).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!("public".parse::<SaleKind>().is_err());
        assert!(serde_json::from_str::<SaleKind>("\"public\"").is_err());
    }

    #[test]
    fn inverted_window_fails_validation() {
        let err = Sale::new(SaleKind::PreSale, batch("b1"), 1, 0).unwrap_err();
        assert_eq!(err, CoreError::InvalidSaleWindow { start: 1, end: 0 });
    }

    #[test]
    fn degenerate_window_is_allowed() {
        // start == end is a valid (instantaneous) window
        assert!(Sale::new(SaleKind::FirstCome, batch("b1"), 5, 5).is_ok());
    }

    #[test]
    fn window_membership() {
        let sale = Sale::new(SaleKind::Allowlist, batch("b1"), 10, 20).unwrap();
        assert!(!sale.is_open_at(9));
        assert!(sale.is_open_at(10));
        assert!(sale.is_open_at(20));
        assert!(!sale.is_open_at(21));
    }

    #[test]
    fn sale_wire_format_uses_published_field_names() {
        let sale = Sale::new(SaleKind::PreSale, batch("b1"), 0, 1).unwrap();
        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(json["type"], "pre-sale");
        assert_eq!(json["batch"], "b1");
        assert_eq!(json["startTimestamp"], 0);
        assert_eq!(json["endTimestamp"], 1);
    }
}
