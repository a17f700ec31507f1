//! Quorum-gated wallet support
//!
//! Provides M-of-N approval wallets where M distinct approvals from N
//! authorized signers are required before a state change takes effect.
//!
//! # Example
//!
//! ```ignore
//! use quorum_wallet::wallet::{Wallet, WalletConfig, TransactionKind};
//!
//! // Create a 2-of-3 wallet
//! let config = WalletConfig::new(vec![alice, bob, carol], 2)?;
//! let mut wallet = Wallet::new(&address, config, events);
//!
//! // Propose a transfer (counts the proposer's approval)
//! let tx = wallet.propose(&alice, kind, &mut ledger)?;
//!
//! // A second approval reaches quorum and executes
//! wallet.approve_tx(&bob, tx.id, &mut ledger)?;
//! ```

pub mod transaction;
pub mod wallet;

pub use transaction::{Transaction, TransactionKind, TransactionStatus};
pub use wallet::{Wallet, WalletConfig, WalletError};
