//! In-memory fungible-asset ledger
//!
//! Reference implementation of the account-balance service with
//! per-asset balances, allowances, and a capped transfer history.

use crate::ledger::service::{AccountLedger, LedgerError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Transfers kept per asset for auditing
const HISTORY_LIMIT: usize = 100;

/// Asset metadata (immutable after issuance)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AssetMetadata {
    /// Asset name (e.g., "Gold Reserve")
    pub name: String,
    /// Asset symbol (e.g., "GLD")
    pub symbol: String,
    /// Total supply (fixed at issuance)
    pub total_supply: u128,
    /// Issuer address
    pub issuer: String,
    /// Timestamp when issued
    pub created_at: DateTime<Utc>,
}

/// A completed transfer, kept for audit
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferRecord {
    pub asset: String,
    pub from: String,
    pub to: String,
    pub amount: u128,
    pub timestamp: DateTime<Utc>,
}

/// Ledger entry for one fungible asset
#[derive(Clone, Debug, Serialize, Deserialize)]
struct Asset {
    metadata: AssetMetadata,
    /// Balances: account -> amount
    balances: HashMap<String, u128>,
    /// Allowances: owner -> (spender -> amount)
    allowances: HashMap<String, HashMap<String, u128>>,
    history: Vec<TransferRecord>,
}

impl Asset {
    fn move_funds(
        &mut self,
        asset_address: &str,
        from: &str,
        to: &str,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        if from == to {
            return Err(LedgerError::SelfTransfer);
        }

        let from_balance = *self.balances.get(from).unwrap_or(&0);
        if from_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                have: from_balance,
                need: amount,
            });
        }

        *self.balances.entry(from.to_string()).or_insert(0) -= amount;
        *self.balances.entry(to.to_string()).or_insert(0) += amount;

        self.history.push(TransferRecord {
            asset: asset_address.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            amount,
            timestamp: Utc::now(),
        });
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
        }

        Ok(())
    }
}

/// In-memory multi-asset ledger
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TokenLedger {
    /// Assets by address
    assets: HashMap<String, Asset>,
    /// Issuance counter for address generation
    nonce: u64,
}

impl TokenLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            assets: HashMap::new(),
            nonce: 0,
        }
    }

    /// Issue a new asset with the full supply allocated to the issuer
    ///
    /// # Errors
    /// Returns an error for an empty or oversized name/symbol, a zero
    /// supply, or an address collision.
    pub fn issue_asset(
        &mut self,
        name: String,
        symbol: String,
        total_supply: u128,
        issuer: &str,
    ) -> Result<String, LedgerError> {
        if name.is_empty() || name.len() > 50 {
            return Err(LedgerError::InvalidName);
        }

        if symbol.is_empty() || symbol.len() > 10 {
            return Err(LedgerError::InvalidSymbol);
        }

        if total_supply == 0 {
            return Err(LedgerError::InvalidSupply);
        }

        let address = self.generate_address(issuer, &symbol);
        self.nonce += 1;

        if self.assets.contains_key(&address) {
            return Err(LedgerError::AssetAlreadyExists(address));
        }

        let mut balances = HashMap::new();
        balances.insert(issuer.to_string(), total_supply);

        let asset = Asset {
            metadata: AssetMetadata {
                name,
                symbol,
                total_supply,
                issuer: issuer.to_string(),
                created_at: Utc::now(),
            },
            balances,
            allowances: HashMap::new(),
            history: Vec::new(),
        };

        log::info!(
            "asset issued: {} ({}) at {}",
            asset.metadata.name,
            asset.metadata.symbol,
            address
        );
        self.assets.insert(address.clone(), asset);

        Ok(address)
    }

    /// Derive an asset address from issuer and symbol
    fn generate_address(&self, issuer: &str, symbol: &str) -> String {
        let input = format!("{}:{}:{}", issuer, symbol, self.nonce);
        let hash = Sha256::digest(input.as_bytes());
        format!("0x{}", &hex::encode(hash)[..40])
    }

    /// Get metadata for an asset
    pub fn metadata(&self, asset: &str) -> Option<&AssetMetadata> {
        self.assets.get(asset).map(|a| &a.metadata)
    }

    /// Check if an asset exists
    pub fn exists(&self, asset: &str) -> bool {
        self.assets.contains_key(asset)
    }

    /// Get the number of issued assets
    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    /// Get the allowance granted by `owner` to `spender`
    pub fn allowance(&self, asset: &str, owner: &str, spender: &str) -> u128 {
        self.assets
            .get(asset)
            .and_then(|a| a.allowances.get(owner))
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Transfer a holder's own funds (funding flows)
    pub fn transfer(
        &mut self,
        asset: &str,
        from: &str,
        to: &str,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let entry = self
            .assets
            .get_mut(asset)
            .ok_or_else(|| LedgerError::UnknownAsset(asset.to_string()))?;

        entry.move_funds(asset, from, to, amount)
    }

    /// Get the transfer history for an asset
    pub fn history(&self, asset: &str) -> Result<&[TransferRecord], LedgerError> {
        let entry = self
            .assets
            .get(asset)
            .ok_or_else(|| LedgerError::UnknownAsset(asset.to_string()))?;

        Ok(&entry.history)
    }
}

impl AccountLedger for TokenLedger {
    fn balance_of(&self, asset: &str, account: &str) -> u128 {
        self.assets
            .get(asset)
            .and_then(|a| a.balances.get(account))
            .copied()
            .unwrap_or(0)
    }

    fn approve(
        &mut self,
        asset: &str,
        owner: &str,
        spender: &str,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let entry = self
            .assets
            .get_mut(asset)
            .ok_or_else(|| LedgerError::UnknownAsset(asset.to_string()))?;

        // An amount of 0 revokes
        entry
            .allowances
            .entry(owner.to_string())
            .or_default()
            .insert(spender.to_string(), amount);

        Ok(())
    }

    fn transfer_from(
        &mut self,
        asset: &str,
        spender: &str,
        owner: &str,
        recipient: &str,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let entry = self
            .assets
            .get_mut(asset)
            .ok_or_else(|| LedgerError::UnknownAsset(asset.to_string()))?;

        // Own funds need no allowance
        if spender != owner {
            let current = entry
                .allowances
                .get(owner)
                .and_then(|spenders| spenders.get(spender))
                .copied()
                .unwrap_or(0);
            if current < amount {
                return Err(LedgerError::InsufficientAllowance {
                    have: current,
                    need: amount,
                });
            }
        }

        entry.move_funds(asset, owner, recipient, amount)?;

        if spender != owner {
            if let Some(spenders) = entry.allowances.get_mut(owner) {
                if let Some(allowance) = spenders.get_mut(spender) {
                    *allowance -= amount;
                }
            }
        }

        Ok(())
    }
}
