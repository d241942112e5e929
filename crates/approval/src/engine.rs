//! Approval engine - quorum-gated submit/approve/revoke/execute
//!
//! Every operation validates all of its preconditions before touching the
//! ledger, so a rejected call has no effect. Mutating operations take
//! `&mut self`; on a single instance they are serialized by the borrow, and
//! `execute` keeps that exclusive borrow across the effect call.

use crate::config::WalletConfig;
use crate::effect::{EffectExecutor, EffectOutcome, NoOpEffect};
use crate::error::{ApprovalError, ApprovalResult};
use crate::event::WalletEvent;
use crate::ledger::TransactionLedger;
use crate::registry::OwnerRegistry;
use crate::transaction::{Transaction, TransactionStatus};
use multisig_core::{Amount, Caller, Payload, Principal, Target};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Counts of transactions by state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletStats {
    pub total: u64,
    pub pending: usize,
    pub executed: usize,
}

pub struct ApprovalEngine {
    registry: OwnerRegistry,
    ledger: TransactionLedger,
    effect: Arc<dyn EffectExecutor>,
    events: broadcast::Sender<WalletEvent>,
}

impl ApprovalEngine {
    pub fn new(config: &WalletConfig, effect: Arc<dyn EffectExecutor>) -> ApprovalResult<Self> {
        let registry = OwnerRegistry::from_config(config)?;
        let (events, _) = broadcast::channel(config.event_capacity);

        info!(
            owners = registry.len(),
            quorum = registry.quorum(),
            effect = effect.name(),
            "Approval engine created"
        );

        Ok(Self {
            registry,
            ledger: TransactionLedger::new(),
            effect,
            events,
        })
    }

    /// Engine whose effect always succeeds
    pub fn with_noop_effect(config: &WalletConfig) -> ApprovalResult<Self> {
        Self::new(config, Arc::new(NoOpEffect))
    }

    /// Subscribe to observations emitted from now on
    pub fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.events.subscribe()
    }

    /// Register a new pending transaction and return its index
    pub fn submit(
        &mut self,
        caller: &Caller,
        target: Target,
        value: Amount,
        payload: Payload,
    ) -> ApprovalResult<u64> {
        let owner = self.authorize(caller)?;

        let index = self.ledger.append(owner.clone(), target, value, payload);

        info!(index, owner = %owner, value = %value, "Transaction submitted");
        self.publish(WalletEvent::Submit { index });
        Ok(index)
    }

    /// Add the caller's approval to a pending transaction
    pub fn approve(&mut self, caller: &Caller, index: u64) -> ApprovalResult<()> {
        let owner = self.authorize(caller)?;

        let tx = self.pending_mut(index)?;
        if !tx.add_approval(owner.clone()) {
            debug!(index, owner = %owner, "Duplicate approval rejected");
            return Err(ApprovalError::AlreadyApproved {
                owner: owner.clone(),
                index,
            });
        }
        let approvals = tx.approval_count();

        info!(index, owner = %owner, approvals, "Transaction approved");
        self.publish(WalletEvent::Approve {
            owner: owner.clone(),
            index,
        });
        Ok(())
    }

    /// Withdraw the caller's approval from a pending transaction
    pub fn revoke(&mut self, caller: &Caller, index: u64) -> ApprovalResult<()> {
        let owner = self.authorize(caller)?;

        let tx = self.pending_mut(index)?;
        if !tx.remove_approval(owner) {
            debug!(index, owner = %owner, "Revoke without approval rejected");
            return Err(ApprovalError::NotApproved {
                owner: owner.clone(),
                index,
            });
        }
        let approvals = tx.approval_count();

        info!(index, owner = %owner, approvals, "Approval revoked");
        self.publish(WalletEvent::Revoke {
            owner: owner.clone(),
            index,
        });
        Ok(())
    }

    /// Run the effect for a transaction that has reached quorum.
    ///
    /// The transaction is marked executed only after the effect reports
    /// success; a failed effect leaves it pending and the call can be retried.
    pub async fn execute(&mut self, caller: &Caller, index: u64) -> ApprovalResult<()> {
        let owner = self.authorize(caller)?;
        let quorum = self.registry.quorum();

        let tx = self.ledger.get(index)?;
        if tx.is_executed() {
            debug!(index, "Execute on executed transaction rejected");
            return Err(ApprovalError::AlreadyExecuted(index));
        }
        if !tx.meets_quorum(quorum) {
            debug!(index, approvals = tx.approval_count(), quorum, "Quorum not reached");
            return Err(ApprovalError::InsufficientApprovals {
                index,
                approvals: tx.approval_count(),
                required: quorum,
            });
        }

        let outcome = self.effect.run(&tx.target, tx.value, &tx.payload).await;

        if let EffectOutcome::Failure(reason) = outcome {
            warn!(
                index,
                owner = %owner,
                effect = self.effect.name(),
                reason = %reason,
                "Effect failed, transaction left pending"
            );
            return Err(ApprovalError::EffectFailed { index, reason });
        }

        let tx = self.ledger.get_mut(index)?;
        tx.mark_executed();

        info!(
            index,
            owner = %owner,
            target = %tx.target,
            value = %tx.value,
            payload_hash = %tx.payload_hash,
            "Transaction executed"
        );
        self.publish(WalletEvent::Execute { index });
        Ok(())
    }

    /// Number of submitted transactions (also the next index)
    pub fn transaction_count(&self) -> u64 {
        self.ledger.len()
    }

    /// Index of the most recently submitted transaction
    pub fn latest_index(&self) -> Option<u64> {
        self.ledger.latest_index()
    }

    pub fn transaction(&self, index: u64) -> ApprovalResult<&Transaction> {
        self.ledger.get(index)
    }

    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.ledger.iter()
    }

    pub fn is_approved(&self, index: u64, owner: &Principal) -> ApprovalResult<bool> {
        Ok(self.ledger.get(index)?.has_approved(owner))
    }

    pub fn approval_count(&self, index: u64) -> ApprovalResult<usize> {
        Ok(self.ledger.get(index)?.approval_count())
    }

    pub fn owners(&self) -> &[Principal] {
        self.registry.owners()
    }

    pub fn is_owner(&self, principal: &Principal) -> bool {
        self.registry.is_owner(principal)
    }

    pub fn quorum(&self) -> usize {
        self.registry.quorum()
    }

    pub fn stats(&self) -> WalletStats {
        WalletStats {
            total: self.ledger.len(),
            pending: self.ledger.count_by_status(TransactionStatus::Pending),
            executed: self.ledger.count_by_status(TransactionStatus::Executed),
        }
    }

    fn authorize<'c>(&self, caller: &'c Caller) -> ApprovalResult<&'c Principal> {
        let principal = caller.principal();
        if !self.registry.is_owner(principal) {
            debug!(caller = %principal, "Call from non-owner rejected");
            return Err(ApprovalError::Unauthorized(principal.clone()));
        }
        Ok(principal)
    }

    fn pending_mut(&mut self, index: u64) -> ApprovalResult<&mut Transaction> {
        let tx = self.ledger.get_mut(index)?;
        if tx.is_executed() {
            debug!(index, "Change to executed transaction rejected");
            return Err(ApprovalError::AlreadyExecuted(index));
        }
        Ok(tx)
    }

    fn publish(&self, event: WalletEvent) {
        // No subscribers is fine: observations are not retained
        let _ = self.events.send(event);
    }
}
