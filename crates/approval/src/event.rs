//! Observations emitted by the engine after a successful operation
//!
//! Events are broadcast to whoever is subscribed at the time and are not
//! retained by the engine.

use multisig_core::Principal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WalletEvent {
    /// A transaction was registered at `index`
    Submit { index: u64 },

    /// `owner` approved the transaction at `index`
    Approve { owner: Principal, index: u64 },

    /// `owner` withdrew its approval of the transaction at `index`
    Revoke { owner: Principal, index: u64 },

    /// The transaction at `index` was executed
    Execute { index: u64 },
}

impl WalletEvent {
    pub fn index(&self) -> u64 {
        match self {
            WalletEvent::Submit { index }
            | WalletEvent::Approve { index, .. }
            | WalletEvent::Revoke { index, .. }
            | WalletEvent::Execute { index } => *index,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WalletEvent::Submit { .. } => "Submit",
            WalletEvent::Approve { .. } => "Approve",
            WalletEvent::Revoke { .. } => "Revoke",
            WalletEvent::Execute { .. } => "Execute",
        }
    }
}
