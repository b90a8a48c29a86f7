//! Core operations
//!
//! Each operation set is a plain struct holding the injected store
//! handle, with methods taking request data. No shared mutable state
//! beyond what the store itself arbitrates.

pub mod batch;
pub mod proof;
pub mod sale;
pub mod whitelist;

pub use batch::BatchAggregator;
pub use proof::ProofResolver;
pub use sale::SaleManager;
pub use whitelist::WhitelistAdmin;
