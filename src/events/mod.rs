//! Wallet event notifications
//!
//! Observers subscribe to a shared bus instead of polling wallet state.

pub mod bus;

pub use bus::{EventBus, WalletEvent};
