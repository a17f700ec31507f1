//! Quorum-gated wallet state machine
//!
//! Holds the signer set and approval threshold, and settles transactions
//! once enough distinct approvals accumulate.

use crate::events::{EventBus, WalletEvent};
use crate::ledger::{AccountLedger, LedgerError};
use crate::wallet::transaction::{Transaction, TransactionKind, TransactionStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

/// Wallet-related errors
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Not authorized: {0} is not a signer")]
    NotAuthorized(String),
    #[error("Transaction not found: {0}")]
    NotFound(u64),
    #[error("Transaction {id} already approved by {signer}")]
    AlreadyApproved { id: u64, signer: String },
    #[error("Transaction {id} is not pending: {status:?}")]
    NotPending { id: u64, status: TransactionStatus },
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Ledger failure: {0}")]
    Ledger(#[from] LedgerError),
}

/// Configuration for a wallet: who may sign, and how many must
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WalletConfig {
    signers: Vec<String>,
    quorum: u8,
}

impl WalletConfig {
    /// Validate a signer set and approval threshold
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` for an empty or duplicated signer
    /// set, or a quorum outside `[1, signers.len()]`.
    pub fn new(signers: Vec<String>, quorum: u8) -> Result<Self, WalletError> {
        if signers.is_empty() {
            return Err(WalletError::InvalidConfiguration(
                "at least one signer required".to_string(),
            ));
        }

        if quorum == 0 {
            return Err(WalletError::InvalidConfiguration(
                "quorum must be at least 1".to_string(),
            ));
        }

        if quorum as usize > signers.len() {
            return Err(WalletError::InvalidConfiguration(format!(
                "quorum {} exceeds signer count {}",
                quorum,
                signers.len()
            )));
        }

        let distinct: HashSet<&str> = signers.iter().map(String::as_str).collect();
        if distinct.len() != signers.len() {
            return Err(WalletError::InvalidConfiguration(
                "duplicate signer".to_string(),
            ));
        }

        Ok(Self { signers, quorum })
    }

    /// Approval threshold (M in M-of-N)
    pub fn quorum(&self) -> u8 {
        self.quorum
    }

    /// Total signer count (N)
    pub fn signer_count(&self) -> usize {
        self.signers.len()
    }

    /// The configured signers
    pub fn signers(&self) -> &[String] {
        &self.signers
    }
}

/// A quorum-gated custodial wallet
///
/// State-changing calls are serialized by the host: each runs to
/// completion before the next begins, so approvals accumulate across
/// calls while every call stays individually atomic.
#[derive(Debug)]
pub struct Wallet {
    /// Unique handle assigned at creation
    address: String,
    /// Authorized signers
    signers: HashSet<String>,
    /// Distinct approvals required to execute
    quorum: u8,
    /// Next transaction id; ids start at 1 and are never reused
    next_id: u64,
    /// Every transaction ever proposed, kept for audit
    transactions: BTreeMap<u64, Transaction>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Bus for proposal, approval and execution events
    events: Arc<EventBus>,
}

impl Wallet {
    /// Create a wallet from a validated configuration
    pub fn new(address: &str, config: WalletConfig, events: Arc<EventBus>) -> Self {
        Self {
            address: address.to_string(),
            signers: config.signers().iter().cloned().collect(),
            quorum: config.quorum(),
            next_id: 1,
            transactions: BTreeMap::new(),
            created_at: Utc::now(),
            events,
        }
    }

    /// Get the wallet handle
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Get the approval threshold
    pub fn quorum(&self) -> u8 {
        self.quorum
    }

    /// Get the number of authorized signers
    pub fn signer_count(&self) -> usize {
        self.signers.len()
    }

    /// Check whether an account is an authorized signer
    pub fn is_signer(&self, account: &str) -> bool {
        self.signers.contains(account)
    }

    /// Get the signers, sorted for deterministic output
    pub fn signers(&self) -> Vec<&str> {
        let mut signers: Vec<&str> = self.signers.iter().map(String::as_str).collect();
        signers.sort_unstable();
        signers
    }

    /// Get description like "2-of-3"
    pub fn description(&self) -> String {
        format!("{}-of-{}", self.quorum, self.signers.len())
    }

    /// When the wallet was created
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Look up a transaction by id
    pub fn transaction(&self, id: u64) -> Option<&Transaction> {
        self.transactions.get(&id)
    }

    /// Transactions still collecting approvals, in id order
    pub fn pending_transactions(&self) -> Vec<&Transaction> {
        self.transactions
            .values()
            .filter(|tx| tx.status == TransactionStatus::Pending)
            .collect()
    }

    /// Total number of transactions ever proposed
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Propose a state-changing transaction
    ///
    /// The proposer's approval is counted immediately. Funds are not
    /// checked here; execution re-validates the balance, so a proposal
    /// may precede the wallet being funded. When a single approval
    /// already meets quorum the transaction executes within this call.
    ///
    /// Returns a snapshot of the transaction as recorded.
    ///
    /// # Errors
    /// `NotAuthorized` for a non-signer caller; `InvalidPayload` for a
    /// zero amount, a transfer to the wallet itself, a quorum target
    /// outside `[1, signer_count]`, or a signer change that cannot
    /// apply. A failed immediate execution surfaces here with the
    /// transaction recorded as `Failed`.
    pub fn propose<L: AccountLedger>(
        &mut self,
        caller: &str,
        kind: TransactionKind,
        ledger: &mut L,
    ) -> Result<Transaction, WalletError> {
        if !self.signers.contains(caller) {
            return Err(WalletError::NotAuthorized(caller.to_string()));
        }

        self.validate_payload(&kind)?;

        let id = self.next_id;
        self.next_id += 1;

        let tx = Transaction::new(id, kind.clone(), caller);
        self.transactions.insert(id, tx);

        self.events.broadcast(WalletEvent::TransactionProposed {
            wallet: self.address.clone(),
            id,
            kind,
            proposer: caller.to_string(),
        });
        log::debug!("wallet {}: tx {} proposed by {}", self.address, id, caller);

        // The proposer's implicit approval can already meet quorum
        if self.quorum == 1 {
            self.execute(id, ledger)?;
        }

        self.transactions
            .get(&id)
            .cloned()
            .ok_or(WalletError::NotFound(id))
    }

    /// Approve a pending transaction
    ///
    /// Membership is checked against the current signer set, so a signer
    /// admitted after the proposal may approve it. When this approval
    /// reaches quorum the transaction executes atomically within the
    /// same call; a rejected effect settles it as `Failed` and the
    /// error propagates to the approving caller.
    ///
    /// # Errors
    /// `NotAuthorized` (non-signer), `NotFound` (unknown id),
    /// `NotPending` (settled transaction), `AlreadyApproved` (duplicate
    /// approval by the same signer).
    pub fn approve_tx<L: AccountLedger>(
        &mut self,
        caller: &str,
        id: u64,
        ledger: &mut L,
    ) -> Result<(), WalletError> {
        if !self.signers.contains(caller) {
            return Err(WalletError::NotAuthorized(caller.to_string()));
        }

        let tx = self
            .transactions
            .get_mut(&id)
            .ok_or(WalletError::NotFound(id))?;

        if tx.status.is_terminal() {
            return Err(WalletError::NotPending {
                id,
                status: tx.status,
            });
        }

        if !tx.approvals.insert(caller.to_string()) {
            return Err(WalletError::AlreadyApproved {
                id,
                signer: caller.to_string(),
            });
        }
        tx.touch();
        let approvals = tx.approval_count();

        self.events.broadcast(WalletEvent::TransactionApproved {
            wallet: self.address.clone(),
            id,
            approver: caller.to_string(),
            approvals,
        });
        log::debug!(
            "wallet {}: tx {} approved by {} ({}/{})",
            self.address,
            id,
            caller,
            approvals,
            self.quorum
        );

        if approvals >= self.quorum as usize {
            self.execute(id, ledger)?;
        }

        Ok(())
    }

    /// Apply a transaction's effect and settle it in a single step
    ///
    /// The status flips together with the effect: it is not touched
    /// before the ledger call's outcome is known, and a rejection
    /// settles the transaction as `Failed` with no balance change.
    fn execute<L: AccountLedger>(&mut self, id: u64, ledger: &mut L) -> Result<(), WalletError> {
        let kind = match self.transactions.get(&id) {
            Some(tx) => tx.kind.clone(),
            None => return Err(WalletError::NotFound(id)),
        };

        let outcome = self.apply_effect(&kind, ledger);
        let status = if outcome.is_ok() {
            TransactionStatus::Executed
        } else {
            TransactionStatus::Failed
        };

        if let Some(tx) = self.transactions.get_mut(&id) {
            tx.status = status;
            tx.touch();
        }

        self.events.broadcast(WalletEvent::TransactionExecuted {
            wallet: self.address.clone(),
            id,
            status,
        });
        match &outcome {
            Ok(()) => log::info!(
                "wallet {}: tx {} executed ({})",
                self.address,
                id,
                kind.label()
            ),
            Err(e) => log::warn!("wallet {}: tx {} failed: {}", self.address, id, e),
        }

        outcome
    }

    fn apply_effect<L: AccountLedger>(
        &mut self,
        kind: &TransactionKind,
        ledger: &mut L,
    ) -> Result<(), WalletError> {
        // The signer set and quorum may have changed while this
        // transaction was pending; payload constraints are re-checked
        // against the current state.
        self.validate_payload(kind)?;

        match kind {
            TransactionKind::AssetTransfer {
                asset,
                recipient,
                amount,
            } => {
                let have = ledger.balance_of(asset, &self.address);
                if have < *amount {
                    return Err(WalletError::Ledger(LedgerError::InsufficientBalance {
                        have,
                        need: *amount,
                    }));
                }
                ledger.transfer_from(asset, &self.address, &self.address, recipient, *amount)?;
            }
            TransactionKind::QuorumUpdate { quorum } => {
                self.quorum = *quorum;
            }
            TransactionKind::AddSigner { signer } => {
                self.signers.insert(signer.clone());
            }
            TransactionKind::RemoveSigner { signer } => {
                self.signers.remove(signer);
            }
        }

        Ok(())
    }

    fn validate_payload(&self, kind: &TransactionKind) -> Result<(), WalletError> {
        match kind {
            TransactionKind::AssetTransfer {
                recipient, amount, ..
            } => {
                if *amount == 0 {
                    return Err(WalletError::InvalidPayload(
                        "amount must be greater than 0".to_string(),
                    ));
                }
                if recipient == &self.address {
                    return Err(WalletError::InvalidPayload(
                        "recipient is the wallet itself".to_string(),
                    ));
                }
            }
            TransactionKind::QuorumUpdate { quorum } => {
                if *quorum == 0 || *quorum as usize > self.signers.len() {
                    return Err(WalletError::InvalidPayload(format!(
                        "quorum {} out of range 1..={}",
                        quorum,
                        self.signers.len()
                    )));
                }
            }
            TransactionKind::AddSigner { signer } => {
                if self.signers.contains(signer) {
                    return Err(WalletError::InvalidPayload(format!(
                        "{signer} is already a signer"
                    )));
                }
            }
            TransactionKind::RemoveSigner { signer } => {
                if !self.signers.contains(signer) {
                    return Err(WalletError::InvalidPayload(format!(
                        "{signer} is not a signer"
                    )));
                }
                if self.signers.len() - 1 < self.quorum as usize {
                    return Err(WalletError::InvalidPayload(
                        "removal would leave fewer signers than quorum".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TokenLedger;

    const WALLET_ADDR: &str = "0xwallet";

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn test_wallet(quorum: u8) -> Wallet {
        init_logs();
        let signers = vec![
            "alice".to_string(),
            "bob".to_string(),
            "carol".to_string(),
        ];
        let config = WalletConfig::new(signers, quorum).unwrap();
        Wallet::new(WALLET_ADDR, config, Arc::new(EventBus::new()))
    }

    fn funded_ledger(amount: u128) -> (TokenLedger, String) {
        let mut ledger = TokenLedger::new();
        let asset = ledger
            .issue_asset("Gold".to_string(), "GLD".to_string(), 1_000_000, "treasury")
            .unwrap();
        if amount > 0 {
            ledger
                .transfer(&asset, "treasury", WALLET_ADDR, amount)
                .unwrap();
        }
        (ledger, asset)
    }

    fn transfer_kind(asset: &str, amount: u128) -> TransactionKind {
        TransactionKind::AssetTransfer {
            asset: asset.to_string(),
            recipient: "dave".to_string(),
            amount,
        }
    }

    #[test]
    fn test_config_validation() {
        // Empty signer set
        assert!(WalletConfig::new(vec![], 1).is_err());

        // Zero quorum
        assert!(WalletConfig::new(vec!["alice".to_string()], 0).is_err());

        // Quorum above signer count
        assert!(WalletConfig::new(vec!["alice".to_string()], 2).is_err());

        // Duplicate signers
        assert!(WalletConfig::new(vec!["alice".to_string(), "alice".to_string()], 1).is_err());

        let config = WalletConfig::new(vec!["alice".to_string(), "bob".to_string()], 2).unwrap();
        assert_eq!(config.quorum(), 2);
        assert_eq!(config.signer_count(), 2);
    }

    #[test]
    fn test_propose_requires_signer() {
        let mut wallet = test_wallet(2);
        let (mut ledger, asset) = funded_ledger(1_000);

        let result = wallet.propose("mallory", transfer_kind(&asset, 100), &mut ledger);
        assert!(matches!(result, Err(WalletError::NotAuthorized(_))));
        assert_eq!(wallet.transaction_count(), 0);
    }

    #[test]
    fn test_propose_rejects_invalid_payloads() {
        let mut wallet = test_wallet(2);
        let (mut ledger, asset) = funded_ledger(1_000);

        // Zero amount
        let result = wallet.propose("alice", transfer_kind(&asset, 0), &mut ledger);
        assert!(matches!(result, Err(WalletError::InvalidPayload(_))));

        // Transfer to the wallet itself
        let result = wallet.propose(
            "alice",
            TransactionKind::AssetTransfer {
                asset: asset.clone(),
                recipient: WALLET_ADDR.to_string(),
                amount: 100,
            },
            &mut ledger,
        );
        assert!(matches!(result, Err(WalletError::InvalidPayload(_))));

        // Quorum target out of range
        let result = wallet.propose(
            "alice",
            TransactionKind::QuorumUpdate { quorum: 0 },
            &mut ledger,
        );
        assert!(matches!(result, Err(WalletError::InvalidPayload(_))));
        let result = wallet.propose(
            "alice",
            TransactionKind::QuorumUpdate { quorum: 4 },
            &mut ledger,
        );
        assert!(matches!(result, Err(WalletError::InvalidPayload(_))));

        // Rejected proposals never allocate an id
        assert_eq!(wallet.transaction_count(), 0);
        let tx = wallet
            .propose("alice", transfer_kind(&asset, 100), &mut ledger)
            .unwrap();
        assert_eq!(tx.id, 1);
    }

    #[test]
    fn test_propose_records_pending_with_proposer_approval() {
        let mut wallet = test_wallet(2);
        let (mut ledger, asset) = funded_ledger(1_000);

        let tx = wallet
            .propose("alice", transfer_kind(&asset, 500), &mut ledger)
            .unwrap();

        assert_eq!(tx.id, 1);
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_eq!(tx.approval_count(), 1);
        assert!(tx.is_approved_by("alice"));

        // No effect before quorum
        assert_eq!(ledger.balance_of(&asset, WALLET_ADDR), 1_000);
        assert_eq!(ledger.balance_of(&asset, "dave"), 0);
        assert_eq!(wallet.pending_transactions().len(), 1);
    }

    #[test]
    fn test_ids_strictly_increasing() {
        let mut wallet = test_wallet(3);
        let (mut ledger, asset) = funded_ledger(1_000);

        for expected in 1..=4u64 {
            let tx = wallet
                .propose("alice", transfer_kind(&asset, 10), &mut ledger)
                .unwrap();
            assert_eq!(tx.id, expected);
        }
    }

    #[test]
    fn test_propose_may_precede_funding() {
        let mut wallet = test_wallet(2);
        let (mut ledger, asset) = funded_ledger(0);

        // Proposing more than the wallet holds succeeds
        let tx = wallet
            .propose("alice", transfer_kind(&asset, 500), &mut ledger)
            .unwrap();
        assert_eq!(tx.status, TransactionStatus::Pending);

        // Funding arrives before the second approval
        ledger
            .transfer(&asset, "treasury", WALLET_ADDR, 500)
            .unwrap();
        wallet.approve_tx("bob", tx.id, &mut ledger).unwrap();
        assert_eq!(ledger.balance_of(&asset, "dave"), 500);
    }

    #[test]
    fn test_quorum_of_one_executes_at_propose() {
        init_logs();
        let config = WalletConfig::new(vec!["alice".to_string()], 1).unwrap();
        let mut wallet = Wallet::new(WALLET_ADDR, config, Arc::new(EventBus::new()));
        let (mut ledger, asset) = funded_ledger(1_000);

        let tx = wallet
            .propose("alice", transfer_kind(&asset, 300), &mut ledger)
            .unwrap();

        assert_eq!(tx.status, TransactionStatus::Executed);
        assert_eq!(ledger.balance_of(&asset, "dave"), 300);
        assert_eq!(ledger.balance_of(&asset, WALLET_ADDR), 700);
    }

    #[test]
    fn test_quorum_of_one_propose_failure_settles_failed() {
        init_logs();
        let config = WalletConfig::new(vec!["alice".to_string()], 1).unwrap();
        let mut wallet = Wallet::new(WALLET_ADDR, config, Arc::new(EventBus::new()));
        let (mut ledger, asset) = funded_ledger(100);

        let result = wallet.propose("alice", transfer_kind(&asset, 500), &mut ledger);
        assert!(matches!(
            result,
            Err(WalletError::Ledger(LedgerError::InsufficientBalance { .. }))
        ));

        // The transaction is recorded and terminal, funds untouched
        let tx = wallet.transaction(1).unwrap();
        assert_eq!(tx.status, TransactionStatus::Failed);
        assert_eq!(ledger.balance_of(&asset, WALLET_ADDR), 100);
    }

    #[test]
    fn test_second_approval_executes_transfer() {
        let mut wallet = test_wallet(2);
        let (mut ledger, asset) = funded_ledger(5_000);

        let tx = wallet
            .propose("alice", transfer_kind(&asset, 1_000), &mut ledger)
            .unwrap();
        assert_eq!(tx.status, TransactionStatus::Pending);

        wallet.approve_tx("bob", tx.id, &mut ledger).unwrap();

        let settled = wallet.transaction(tx.id).unwrap();
        assert_eq!(settled.status, TransactionStatus::Executed);
        assert_eq!(settled.approval_count(), 2);
        assert_eq!(ledger.balance_of(&asset, "dave"), 1_000);
        assert_eq!(ledger.balance_of(&asset, WALLET_ADDR), 4_000);

        // A third approval on the settled transaction is rejected
        let result = wallet.approve_tx("carol", tx.id, &mut ledger);
        assert!(matches!(
            result,
            Err(WalletError::NotPending {
                status: TransactionStatus::Executed,
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_approval_rejected() {
        let mut wallet = test_wallet(3);
        let (mut ledger, asset) = funded_ledger(1_000);

        let tx = wallet
            .propose("alice", transfer_kind(&asset, 100), &mut ledger)
            .unwrap();

        wallet.approve_tx("bob", tx.id, &mut ledger).unwrap();
        let result = wallet.approve_tx("bob", tx.id, &mut ledger);
        assert!(matches!(result, Err(WalletError::AlreadyApproved { .. })));

        // The duplicate did not advance the count
        assert_eq!(wallet.transaction(tx.id).unwrap().approval_count(), 2);

        // The proposer's implicit approval cannot be repeated either
        let result = wallet.approve_tx("alice", tx.id, &mut ledger);
        assert!(matches!(result, Err(WalletError::AlreadyApproved { .. })));
    }

    #[test]
    fn test_approve_unknown_and_unauthorized() {
        let mut wallet = test_wallet(2);
        let (mut ledger, asset) = funded_ledger(1_000);

        let result = wallet.approve_tx("alice", 42, &mut ledger);
        assert!(matches!(result, Err(WalletError::NotFound(42))));

        let tx = wallet
            .propose("alice", transfer_kind(&asset, 100), &mut ledger)
            .unwrap();
        let result = wallet.approve_tx("mallory", tx.id, &mut ledger);
        assert!(matches!(result, Err(WalletError::NotAuthorized(_))));
    }

    #[test]
    fn test_insufficient_balance_settles_failed() {
        let mut wallet = test_wallet(2);
        let (mut ledger, asset) = funded_ledger(500);

        let tx = wallet
            .propose("alice", transfer_kind(&asset, 1_000), &mut ledger)
            .unwrap();

        let result = wallet.approve_tx("bob", tx.id, &mut ledger);
        assert!(matches!(
            result,
            Err(WalletError::Ledger(LedgerError::InsufficientBalance { .. }))
        ));

        // Terminal failure, no balance change, no retry on the same id
        let settled = wallet.transaction(tx.id).unwrap();
        assert_eq!(settled.status, TransactionStatus::Failed);
        assert_eq!(ledger.balance_of(&asset, WALLET_ADDR), 500);
        assert_eq!(ledger.balance_of(&asset, "dave"), 0);

        let result = wallet.approve_tx("carol", tx.id, &mut ledger);
        assert!(matches!(
            result,
            Err(WalletError::NotPending {
                status: TransactionStatus::Failed,
                ..
            })
        ));

        // Retrying means proposing afresh
        ledger
            .transfer(&asset, "treasury", WALLET_ADDR, 1_000)
            .unwrap();
        let retry = wallet
            .propose("alice", transfer_kind(&asset, 1_000), &mut ledger)
            .unwrap();
        assert_eq!(retry.id, 2);
        wallet.approve_tx("bob", retry.id, &mut ledger).unwrap();
        assert_eq!(ledger.balance_of(&asset, "dave"), 1_000);
    }

    #[test]
    fn test_quorum_update_goes_through_pipeline() {
        let mut wallet = test_wallet(2);
        let (mut ledger, _) = funded_ledger(0);

        let tx = wallet
            .propose(
                "bob",
                TransactionKind::QuorumUpdate { quorum: 3 },
                &mut ledger,
            )
            .unwrap();

        // One approval is not enough even for a quorum change
        assert_eq!(wallet.quorum(), 2);
        assert_eq!(tx.status, TransactionStatus::Pending);

        wallet.approve_tx("carol", tx.id, &mut ledger).unwrap();
        assert_eq!(wallet.quorum(), 3);
        assert!(wallet.quorum() as usize <= wallet.signer_count());
    }

    #[test]
    fn test_quorum_update_revalidated_at_execute() {
        let mut wallet = test_wallet(2);
        let (mut ledger, _) = funded_ledger(0);

        // Valid when proposed: 3 signers, target 3
        let quorum_tx = wallet
            .propose(
                "alice",
                TransactionKind::QuorumUpdate { quorum: 3 },
                &mut ledger,
            )
            .unwrap();

        // Carol is retired while the quorum change is still pending
        let remove_tx = wallet
            .propose(
                "alice",
                TransactionKind::RemoveSigner {
                    signer: "carol".to_string(),
                },
                &mut ledger,
            )
            .unwrap();
        wallet.approve_tx("bob", remove_tx.id, &mut ledger).unwrap();
        assert_eq!(wallet.signer_count(), 2);

        // Target 3 now exceeds the signer count; the execute fails
        let result = wallet.approve_tx("bob", quorum_tx.id, &mut ledger);
        assert!(matches!(result, Err(WalletError::InvalidPayload(_))));
        assert_eq!(
            wallet.transaction(quorum_tx.id).unwrap().status,
            TransactionStatus::Failed
        );
        assert_eq!(wallet.quorum(), 2);
    }

    #[test]
    fn test_add_signer_then_new_signer_approves() {
        let mut wallet = test_wallet(2);
        let (mut ledger, asset) = funded_ledger(1_000);

        let add_tx = wallet
            .propose(
                "alice",
                TransactionKind::AddSigner {
                    signer: "dave".to_string(),
                },
                &mut ledger,
            )
            .unwrap();
        wallet.approve_tx("bob", add_tx.id, &mut ledger).unwrap();

        assert!(wallet.is_signer("dave"));
        assert_eq!(wallet.signer_count(), 4);

        // Membership is evaluated at approval time: dave may approve a
        // transaction proposed before he joined
        let tx = wallet
            .propose(
                "alice",
                TransactionKind::AssetTransfer {
                    asset: asset.clone(),
                    recipient: "erin".to_string(),
                    amount: 200,
                },
                &mut ledger,
            )
            .unwrap();
        wallet.approve_tx("dave", tx.id, &mut ledger).unwrap();
        assert_eq!(ledger.balance_of(&asset, "erin"), 200);
    }

    #[test]
    fn test_remove_signer_guards_quorum_bound() {
        init_logs();
        let config = WalletConfig::new(vec!["alice".to_string(), "bob".to_string()], 2).unwrap();
        let mut wallet = Wallet::new(WALLET_ADDR, config, Arc::new(EventBus::new()));
        let (mut ledger, _) = funded_ledger(0);

        // Removing either signer would leave 1 < quorum 2
        let result = wallet.propose(
            "alice",
            TransactionKind::RemoveSigner {
                signer: "bob".to_string(),
            },
            &mut ledger,
        );
        assert!(matches!(result, Err(WalletError::InvalidPayload(_))));
        assert_eq!(wallet.signer_count(), 2);
    }

    #[test]
    fn test_removed_signer_loses_approval_rights() {
        let mut wallet = test_wallet(2);
        let (mut ledger, asset) = funded_ledger(1_000);

        let tx = wallet
            .propose("carol", transfer_kind(&asset, 100), &mut ledger)
            .unwrap();

        let remove_tx = wallet
            .propose(
                "alice",
                TransactionKind::RemoveSigner {
                    signer: "carol".to_string(),
                },
                &mut ledger,
            )
            .unwrap();
        wallet.approve_tx("bob", remove_tx.id, &mut ledger).unwrap();

        let result = wallet.approve_tx("carol", tx.id, &mut ledger);
        assert!(matches!(result, Err(WalletError::NotAuthorized(_))));
    }

    #[test]
    fn test_events_emitted_in_order() {
        init_logs();
        let bus = Arc::new(EventBus::new());
        let mut rx = bus.subscribe();

        let config = WalletConfig::new(
            vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
            2,
        )
        .unwrap();
        let mut wallet = Wallet::new(WALLET_ADDR, config, Arc::clone(&bus));
        let (mut ledger, asset) = funded_ledger(1_000);

        let tx = wallet
            .propose("alice", transfer_kind(&asset, 100), &mut ledger)
            .unwrap();
        wallet.approve_tx("bob", tx.id, &mut ledger).unwrap();

        match rx.try_recv().unwrap() {
            WalletEvent::TransactionProposed { id, proposer, .. } => {
                assert_eq!(id, tx.id);
                assert_eq!(proposer, "alice");
            }
            other => panic!("unexpected event: {:?}", other),
        }
        match rx.try_recv().unwrap() {
            WalletEvent::TransactionApproved {
                id,
                approver,
                approvals,
                ..
            } => {
                assert_eq!(id, tx.id);
                assert_eq!(approver, "bob");
                assert_eq!(approvals, 2);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        match rx.try_recv().unwrap() {
            WalletEvent::TransactionExecuted { id, status, .. } => {
                assert_eq!(id, tx.id);
                assert_eq!(status, TransactionStatus::Executed);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
