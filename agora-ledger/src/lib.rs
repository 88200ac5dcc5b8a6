//! # Agora Ledger
//! This crate implements the engagement ledger core: the vote toggle state
//! machine, the `VoteLedger` service that applies votes atomically with
//! bounded conflict retries, and the `TrendingRanker` that derives ordered
//! content views from the denormalized aggregates.
pub mod errors;
pub mod ledger;
pub mod machine;
pub mod trending;

pub use errors::LedgerError;
pub use ledger::VoteLedger;
pub use trending::TrendingRanker;
