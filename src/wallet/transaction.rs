//! Pending and settled wallet transactions
//!
//! A transaction records one state-changing request and the approvals
//! collected for it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What a transaction does once quorum is reached
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum TransactionKind {
    /// Move funds out of the wallet through the ledger
    AssetTransfer {
        asset: String,
        recipient: String,
        amount: u128,
    },
    /// Change the approval threshold
    QuorumUpdate { quorum: u8 },
    /// Admit a new signer
    AddSigner { signer: String },
    /// Retire an existing signer
    RemoveSigner { signer: String },
}

impl TransactionKind {
    /// Short label for logging
    pub fn label(&self) -> &'static str {
        match self {
            Self::AssetTransfer { .. } => "asset-transfer",
            Self::QuorumUpdate { .. } => "quorum-update",
            Self::AddSigner { .. } => "add-signer",
            Self::RemoveSigner { .. } => "remove-signer",
        }
    }
}

/// Status of a wallet transaction
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Collecting approvals
    Pending,
    /// Quorum was reached and the effect applied
    Executed,
    /// The effect was rejected at execution time
    Failed,
}

impl TransactionStatus {
    /// Executed and Failed are terminal; no transitions out of them
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Executed | Self::Failed)
    }
}

/// One state-changing request tracked by a wallet
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transaction {
    /// Wallet-scoped sequence number, assigned at creation, never reused
    pub id: u64,
    /// The requested effect
    pub kind: TransactionKind,
    /// Signer who created the request
    pub proposer: String,
    /// Signers who approved; the proposer counts as the first
    pub approvals: HashSet<String>,
    /// Current status
    pub status: TransactionStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// When status or approvals last changed
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a pending transaction with the proposer's implicit approval
    pub fn new(id: u64, kind: TransactionKind, proposer: &str) -> Self {
        let now = Utc::now();
        let mut approvals = HashSet::new();
        approvals.insert(proposer.to_string());

        Self {
            id,
            kind,
            proposer: proposer.to_string(),
            approvals,
            status: TransactionStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Number of distinct approvals collected
    pub fn approval_count(&self) -> usize {
        self.approvals.len()
    }

    /// Check whether a signer has already approved
    pub fn is_approved_by(&self, signer: &str) -> bool {
        self.approvals.contains(signer)
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
