//! Shared handle for hosts that call the engine from many tasks
//!
//! Each operation holds the lock for its whole duration, including the effect
//! call inside `execute`, so operations on one wallet never interleave.

use crate::config::WalletConfig;
use crate::effect::EffectExecutor;
use crate::engine::{ApprovalEngine, WalletStats};
use crate::error::ApprovalResult;
use crate::event::WalletEvent;
use multisig_core::{Amount, Caller, Payload, Target};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<ApprovalEngine>>,
}

impl SharedEngine {
    pub fn new(engine: ApprovalEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn from_config(
        config: &WalletConfig,
        effect: Arc<dyn EffectExecutor>,
    ) -> ApprovalResult<Self> {
        Ok(Self::new(ApprovalEngine::new(config, effect)?))
    }

    pub async fn submit(
        &self,
        caller: &Caller,
        target: Target,
        value: Amount,
        payload: Payload,
    ) -> ApprovalResult<u64> {
        self.inner.lock().await.submit(caller, target, value, payload)
    }

    pub async fn approve(&self, caller: &Caller, index: u64) -> ApprovalResult<()> {
        self.inner.lock().await.approve(caller, index)
    }

    pub async fn revoke(&self, caller: &Caller, index: u64) -> ApprovalResult<()> {
        self.inner.lock().await.revoke(caller, index)
    }

    pub async fn execute(&self, caller: &Caller, index: u64) -> ApprovalResult<()> {
        let mut engine = self.inner.lock().await;
        engine.execute(caller, index).await
    }

    pub async fn transaction_count(&self) -> u64 {
        self.inner.lock().await.transaction_count()
    }

    pub async fn stats(&self) -> WalletStats {
        self.inner.lock().await.stats()
    }

    pub async fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.inner.lock().await.subscribe()
    }

    /// Run a read-only closure against the engine under the lock
    pub async fn inspect<R>(&self, f: impl FnOnce(&ApprovalEngine) -> R) -> R {
        let engine = self.inner.lock().await;
        f(&engine)
    }
}
