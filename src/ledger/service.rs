//! Account-balance service interface
//!
//! The wallet moves value through an external ledger; this module
//! specifies that boundary. A failed call leaves every balance
//! untouched, so the wallet can treat any error as "no transfer
//! happened".

use thiserror::Error;

/// Ledger-related errors
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Unknown asset: {0}")]
    UnknownAsset(String),
    #[error("Asset already exists: {0}")]
    AssetAlreadyExists(String),
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u128, need: u128 },
    #[error("Insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: u128, need: u128 },
    #[error("Invalid amount: amount must be greater than 0")]
    InvalidAmount,
    #[error("Invalid address: cannot transfer to self")]
    SelfTransfer,
    #[error("Invalid name: must be 1-50 characters")]
    InvalidName,
    #[error("Invalid symbol: must be 1-10 characters")]
    InvalidSymbol,
    #[error("Invalid supply: must be greater than 0")]
    InvalidSupply,
}

/// An account-balance service with delegated transfers
///
/// Implementations hold per-asset balances and allowances. The asset
/// argument selects which fungible asset a call operates on.
pub trait AccountLedger {
    /// Balance held by an account (0 for unknown asset/account pairs)
    fn balance_of(&self, asset: &str, account: &str) -> u128;

    /// Allow `spender` to move up to `amount` of `owner`'s funds
    ///
    /// An amount of 0 revokes the allowance.
    fn approve(
        &mut self,
        asset: &str,
        owner: &str,
        spender: &str,
        amount: u128,
    ) -> Result<(), LedgerError>;

    /// Move `owner`'s funds to `recipient`, spending `spender`'s
    /// allowance
    ///
    /// A holder spending its own funds (`spender == owner`) needs no
    /// allowance. Fails on insufficient balance or allowance.
    fn transfer_from(
        &mut self,
        asset: &str,
        spender: &str,
        owner: &str,
        recipient: &str,
        amount: u128,
    ) -> Result<(), LedgerError>;
}
