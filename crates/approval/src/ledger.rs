//! Transaction ledger - append-only list of submitted transactions
//!
//! Indices are dense and assigned in submission order, so the ledger length is
//! always the next index. Mutation of individual records is crate-private and
//! only reachable through the engine.

use crate::error::{ApprovalError, ApprovalResult};
use crate::transaction::{Transaction, TransactionStatus};
use multisig_core::{Amount, Payload, Principal, Target};

#[derive(Debug, Default)]
pub struct TransactionLedger {
    entries: Vec<Transaction>,
}

impl TransactionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pending transaction and return its index
    pub fn append(
        &mut self,
        submitted_by: Principal,
        target: Target,
        value: Amount,
        payload: Payload,
    ) -> u64 {
        let index = self.len();
        self.entries
            .push(Transaction::new(index, submitted_by, target, value, payload));
        index
    }

    pub fn get(&self, index: u64) -> ApprovalResult<&Transaction> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.entries.get(i))
            .ok_or(ApprovalError::NotFound(index))
    }

    pub(crate) fn get_mut(&mut self, index: u64) -> ApprovalResult<&mut Transaction> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.entries.get_mut(i))
            .ok_or(ApprovalError::NotFound(index))
    }

    /// Number of submitted transactions, which is also the next index
    pub fn len(&self) -> u64 {
        self.entries.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the most recently submitted transaction
    pub fn latest_index(&self) -> Option<u64> {
        self.len().checked_sub(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }

    pub fn count_by_status(&self, status: TransactionStatus) -> usize {
        self.entries.iter().filter(|tx| tx.status() == status).count()
    }
}
