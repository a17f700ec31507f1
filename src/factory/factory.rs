//! Wallet factory and instance registry
//!
//! Creates independent wallet instances from a signer configuration and
//! keeps an append-only record of every instance it has created.

use crate::events::{EventBus, WalletEvent};
use crate::wallet::{Wallet, WalletConfig, WalletError};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;

/// Creates wallets and tracks them by creation order and creator
///
/// The registry lives and dies with the factory; every created wallet
/// reports on the factory's shared event bus.
#[derive(Debug)]
pub struct WalletFactory {
    /// Wallet instances by handle
    wallets: HashMap<String, Wallet>,
    /// Handles in creation order (append-only)
    registry: Vec<String>,
    /// Handles per creator, in creation order
    by_creator: HashMap<String, Vec<String>>,
    /// Creation counter for handle derivation
    nonce: u64,
    /// Bus shared with every created wallet
    events: Arc<EventBus>,
}

impl WalletFactory {
    /// Create a factory with its own event bus
    pub fn new() -> Self {
        Self::with_events(Arc::new(EventBus::new()))
    }

    /// Create a factory that reports on an existing bus
    pub fn with_events(events: Arc<EventBus>) -> Self {
        Self {
            wallets: HashMap::new(),
            registry: Vec::new(),
            by_creator: HashMap::new(),
            nonce: 0,
            events,
        }
    }

    /// Create a new wallet and register its handle
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` for an empty or duplicated signer
    /// set, or a quorum outside `[1, signers.len()]`.
    pub fn create_wallet(
        &mut self,
        creator: &str,
        signers: Vec<String>,
        quorum: u8,
    ) -> Result<String, WalletError> {
        let config = WalletConfig::new(signers, quorum)?;

        let address = self.generate_address(creator);
        self.nonce += 1;

        let wallet = Wallet::new(&address, config, Arc::clone(&self.events));
        log::info!(
            "wallet {} created by {} ({})",
            address,
            creator,
            wallet.description()
        );

        self.wallets.insert(address.clone(), wallet);
        self.registry.push(address.clone());
        self.by_creator
            .entry(creator.to_string())
            .or_default()
            .push(address.clone());

        self.events.broadcast(WalletEvent::WalletCreated {
            creator: creator.to_string(),
            wallet: address.clone(),
        });

        Ok(address)
    }

    /// Derive a unique handle from the creator and a nonce
    fn generate_address(&self, creator: &str) -> String {
        let input = format!("{}:{}", creator, self.nonce);
        let hash = Sha256::digest(input.as_bytes());
        format!("0x{}", &hex::encode(hash)[..40])
    }

    /// Get a wallet by handle
    pub fn wallet(&self, handle: &str) -> Option<&Wallet> {
        self.wallets.get(handle)
    }

    /// Get a mutable reference to a wallet
    pub fn wallet_mut(&mut self, handle: &str) -> Option<&mut Wallet> {
        self.wallets.get_mut(handle)
    }

    /// Check if a handle belongs to this factory
    pub fn contains(&self, handle: &str) -> bool {
        self.wallets.contains_key(handle)
    }

    /// Every handle ever created, in creation order
    pub fn list_wallets(&self) -> &[String] {
        &self.registry
    }

    /// Handles created by one creator, in creation order
    pub fn wallets_of(&self, creator: &str) -> &[String] {
        self.by_creator
            .get(creator)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Get the number of wallets created
    pub fn wallet_count(&self) -> usize {
        self.registry.len()
    }

    /// Get the shared event bus
    pub fn events(&self) -> Arc<EventBus> {
        Arc::clone(&self.events)
    }
}

impl Default for WalletFactory {
    fn default() -> Self {
        Self::new()
    }
}
