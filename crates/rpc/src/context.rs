//! Application context - wires config, treasury and engine together

use crate::script::Call;
use crate::treasury::TreasuryEffect;
use multisig_approval::{ApprovalEngine, ApprovalError, WalletConfig, WalletEvent};
use multisig_core::Amount;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{info, warn};

/// What a single call produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Submitted(u64),
    Approved(u64),
    Revoked(u64),
    Executed(u64),
}

impl std::fmt::Display for CallOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallOutcome::Submitted(i) => write!(f, "submitted tx {}", i),
            CallOutcome::Approved(i) => write!(f, "approved tx {}", i),
            CallOutcome::Revoked(i) => write!(f, "revoked approval of tx {}", i),
            CallOutcome::Executed(i) => write!(f, "executed tx {}", i),
        }
    }
}

/// Application context - one wallet per process
pub struct AppContext {
    pub engine: ApprovalEngine,
    pub treasury: Arc<TreasuryEffect>,
    events: broadcast::Receiver<WalletEvent>,
}

impl AppContext {
    pub fn new(config: &WalletConfig, treasury_balance: Amount) -> Result<Self, ApprovalError> {
        let treasury = Arc::new(TreasuryEffect::new(treasury_balance));
        let engine = ApprovalEngine::new(config, treasury.clone())?;
        let events = engine.subscribe();

        Ok(Self {
            engine,
            treasury,
            events,
        })
    }

    pub fn from_config_file(path: &Path, treasury_balance: Amount) -> Result<Self, ApprovalError> {
        let config = WalletConfig::from_file(path)?;
        info!(path = %path.display(), "Loaded wallet config");
        Self::new(&config, treasury_balance)
    }

    /// Dispatch one call to the engine
    pub async fn apply(&mut self, call: &Call) -> Result<CallOutcome, ApprovalError> {
        let caller = call.caller();
        match call {
            Call::Submit {
                target,
                value,
                payload,
                ..
            } => self
                .engine
                .submit(&caller, target.clone(), *value, payload.clone())
                .map(CallOutcome::Submitted),
            Call::Approve { index, .. } => self
                .engine
                .approve(&caller, *index)
                .map(|()| CallOutcome::Approved(*index)),
            Call::Revoke { index, .. } => self
                .engine
                .revoke(&caller, *index)
                .map(|()| CallOutcome::Revoked(*index)),
            Call::Execute { index, .. } => self
                .engine
                .execute(&caller, *index)
                .await
                .map(|()| CallOutcome::Executed(*index)),
        }
    }

    /// Take every observation emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<WalletEvent> {
        let mut drained = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    info!(event = event.name(), index = event.index(), "Wallet event");
                    drained.push(event);
                }
                Err(TryRecvError::Lagged(missed)) => {
                    warn!(missed, "Event receiver lagged");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return drained,
            }
        }
    }
}
