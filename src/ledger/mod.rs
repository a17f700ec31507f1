//! Account-balance ledger the wallet moves value through
//!
//! The `AccountLedger` trait specifies the consumed interface;
//! `TokenLedger` is the in-memory reference implementation.

pub mod service;
pub mod token;

pub use service::{AccountLedger, LedgerError};
pub use token::{AssetMetadata, TokenLedger, TransferRecord};
