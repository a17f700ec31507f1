//! Event broadcasting for wallet state changes
//!
//! Provides a broadcast channel so observers can react to proposals,
//! approvals and executions without polling.

use crate::wallet::{TransactionKind, TransactionStatus};
use serde::Serialize;
use tokio::sync::broadcast;

/// Maximum number of events buffered per subscriber
const BROADCAST_CAPACITY: usize = 100;

/// Events emitted as wallets and their transactions change state
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum WalletEvent {
    /// A new wallet was created by the factory
    WalletCreated { creator: String, wallet: String },
    /// A transaction was proposed on a wallet
    TransactionProposed {
        wallet: String,
        id: u64,
        kind: TransactionKind,
        proposer: String,
    },
    /// A signer approved a pending transaction
    TransactionApproved {
        wallet: String,
        id: u64,
        approver: String,
        approvals: usize,
    },
    /// A transaction reached quorum and settled
    TransactionExecuted {
        wallet: String,
        id: u64,
        status: TransactionStatus,
    },
}

/// Broadcaster for wallet events
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<WalletEvent>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { sender }
    }

    /// Broadcast an event to all subscribers
    pub fn broadcast(&self, event: WalletEvent) {
        // Ignore send errors (no subscribers)
        let _ = self.sender.send(event);
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
