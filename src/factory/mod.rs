//! Wallet instance creation and registry
//!
//! Provides the factory that deploys wallets from a configuration and
//! tracks every instance it has created, queryable by creator.

pub mod factory;

pub use factory::WalletFactory;
