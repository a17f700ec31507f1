//! Quorum-Wallet: a quorum-gated multi-party custodial wallet
//!
//! This crate provides a custodial wallet whose state-changing
//! operations require independent approval from a threshold number of
//! designated signers, featuring:
//! - M-of-N approval with the proposer's implicit first approval
//! - Atomic execute-on-quorum with terminal Executed/Failed settlement
//! - Quorum and signer-set changes governed by the same approval
//!   pipeline as transfers
//! - A factory with an append-only registry of created instances
//! - A pluggable account-balance ledger boundary with an in-memory
//!   reference implementation
//! - Broadcast events for proposals, approvals and executions
//!
//! # Example
//!
//! ```rust
//! use quorum_wallet::factory::WalletFactory;
//! use quorum_wallet::ledger::{AccountLedger, TokenLedger};
//! use quorum_wallet::wallet::TransactionKind;
//!
//! let mut ledger = TokenLedger::new();
//! let asset = ledger
//!     .issue_asset("Gold".to_string(), "GLD".to_string(), 1_000_000, "alice")
//!     .unwrap();
//!
//! // Create a 2-of-3 wallet and fund it
//! let mut factory = WalletFactory::new();
//! let handle = factory
//!     .create_wallet(
//!         "alice",
//!         vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
//!         2,
//!     )
//!     .unwrap();
//! ledger.transfer(&asset, "alice", &handle, 10_000).unwrap();
//!
//! // Propose a transfer; the second approval reaches quorum and executes
//! let wallet = factory.wallet_mut(&handle).unwrap();
//! let tx = wallet
//!     .propose(
//!         "alice",
//!         TransactionKind::AssetTransfer {
//!             asset: asset.clone(),
//!             recipient: "dave".to_string(),
//!             amount: 1_000,
//!         },
//!         &mut ledger,
//!     )
//!     .unwrap();
//! wallet.approve_tx("bob", tx.id, &mut ledger).unwrap();
//!
//! assert_eq!(ledger.balance_of(&asset, "dave"), 1_000);
//! ```

pub mod events;
pub mod factory;
pub mod ledger;
pub mod wallet;

// Re-export commonly used types
pub use events::{EventBus, WalletEvent};
pub use factory::WalletFactory;
pub use ledger::{AccountLedger, LedgerError, TokenLedger};
pub use wallet::{
    Transaction, TransactionKind, TransactionStatus, Wallet, WalletConfig, WalletError,
};
