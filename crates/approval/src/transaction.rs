//! Transaction records tracked by the ledger

use chrono::{DateTime, Utc};
use multisig_core::{Amount, Payload, Principal, Target};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Collecting approvals; approve/revoke/execute allowed
    Pending,
    /// Effect ran successfully; terminal
    Executed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Executed => "executed",
        }
    }
}

/// One owner's approval of a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    pub owner: Principal,
    pub approved_at: DateTime<Utc>,
}

/// A proposed transfer of `value` plus `payload` to `target`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub index: u64,
    pub target: Target,
    pub value: Amount,
    pub payload: Payload,

    /// SHA-256 of the payload, for correlating log lines
    pub payload_hash: String,

    pub submitted_by: Principal,
    pub submitted_at: DateTime<Utc>,

    /// Approvals in the order they were given; at most one per owner
    approvals: Vec<Approval>,

    status: TransactionStatus,
    executed_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub(crate) fn new(
        index: u64,
        submitted_by: Principal,
        target: Target,
        value: Amount,
        payload: Payload,
    ) -> Self {
        Self {
            index,
            target,
            value,
            payload_hash: payload.digest(),
            payload,
            submitted_by,
            submitted_at: Utc::now(),
            approvals: Vec::new(),
            status: TransactionStatus::Pending,
            executed_at: None,
        }
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn is_executed(&self) -> bool {
        self.status == TransactionStatus::Executed
    }

    pub fn executed_at(&self) -> Option<DateTime<Utc>> {
        self.executed_at
    }

    pub fn approvals(&self) -> &[Approval] {
        &self.approvals
    }

    pub fn approval_count(&self) -> usize {
        self.approvals.len()
    }

    pub fn has_approved(&self, owner: &Principal) -> bool {
        self.approvals.iter().any(|a| &a.owner == owner)
    }

    /// Owners that currently approve, in approval order
    pub fn approvers(&self) -> Vec<&Principal> {
        self.approvals.iter().map(|a| &a.owner).collect()
    }

    pub fn meets_quorum(&self, quorum: usize) -> bool {
        self.approvals.len() >= quorum
    }

    pub fn approvals_remaining(&self, quorum: usize) -> usize {
        quorum.saturating_sub(self.approvals.len())
    }

    /// Returns false if the owner already approved
    pub(crate) fn add_approval(&mut self, owner: Principal) -> bool {
        if self.has_approved(&owner) {
            return false;
        }
        self.approvals.push(Approval {
            owner,
            approved_at: Utc::now(),
        });
        true
    }

    /// Returns false if the owner had not approved
    pub(crate) fn remove_approval(&mut self, owner: &Principal) -> bool {
        let before = self.approvals.len();
        self.approvals.retain(|a| &a.owner != owner);
        self.approvals.len() != before
    }

    pub(crate) fn mark_executed(&mut self) {
        debug_assert!(!self.is_executed());
        self.status = TransactionStatus::Executed;
        self.executed_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: &str) -> Principal {
        Principal::new(id).unwrap()
    }

    fn sample() -> Transaction {
        Transaction::new(
            0,
            p("owner1"),
            Target::new("vault").unwrap(),
            "0.001".parse().unwrap(),
            Payload::new(b"blob".to_vec()),
        )
    }

    #[test]
    fn test_new_transaction_is_pending() {
        let tx = sample();
        assert_eq!(tx.status(), TransactionStatus::Pending);
        assert_eq!(tx.approval_count(), 0);
        assert!(tx.executed_at().is_none());
        assert_eq!(tx.payload_hash, tx.payload.digest());
    }

    #[test]
    fn test_approval_set_semantics() {
        let mut tx = sample();

        assert!(tx.add_approval(p("owner1")));
        assert!(!tx.add_approval(p("owner1")));
        assert!(tx.add_approval(p("owner2")));
        assert_eq!(tx.approvers(), vec![&p("owner1"), &p("owner2")]);

        assert!(tx.remove_approval(&p("owner1")));
        assert!(!tx.remove_approval(&p("owner1")));
        assert_eq!(tx.approval_count(), 1);
        assert!(tx.has_approved(&p("owner2")));
    }

    #[test]
    fn test_quorum_counting() {
        let mut tx = sample();
        assert_eq!(tx.approvals_remaining(2), 2);

        tx.add_approval(p("owner1"));
        assert!(!tx.meets_quorum(2));
        assert_eq!(tx.approvals_remaining(2), 1);

        tx.add_approval(p("owner3"));
        assert!(tx.meets_quorum(2));
        assert_eq!(tx.approvals_remaining(2), 0);
    }

    #[test]
    fn test_mark_executed() {
        let mut tx = sample();
        tx.mark_executed();
        assert!(tx.is_executed());
        assert!(tx.executed_at().is_some());
        assert_eq!(tx.status().as_str(), "executed");
    }
}
