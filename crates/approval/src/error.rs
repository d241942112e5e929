//! Approval engine errors

use multisig_core::Principal;
use thiserror::Error;

/// Errors returned by the approval engine.
///
/// Every error is raised before any state change, so a failed call leaves
/// the ledger exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApprovalError {
    #[error("Unauthorized: not owner ({0})")]
    Unauthorized(Principal),

    #[error("Transaction {0} does not exist")]
    NotFound(u64),

    #[error("Transaction {0} already executed")]
    AlreadyExecuted(u64),

    #[error("Transaction {index} already approved by {owner}")]
    AlreadyApproved { owner: Principal, index: u64 },

    #[error("Transaction {index} not approved by {owner}")]
    NotApproved { owner: Principal, index: u64 },

    #[error("Transaction {index} has {approvals} approvals, {required} required")]
    InsufficientApprovals {
        index: u64,
        approvals: usize,
        required: usize,
    },

    #[error("Effect failed for transaction {index}: {reason}")]
    EffectFailed { index: u64, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApprovalError {
    /// Stable short code, used by hosts when reporting outcomes
    pub fn code(&self) -> &'static str {
        match self {
            ApprovalError::Unauthorized(_) => "unauthorized",
            ApprovalError::NotFound(_) => "not_found",
            ApprovalError::AlreadyExecuted(_) => "already_executed",
            ApprovalError::AlreadyApproved { .. } => "already_approved",
            ApprovalError::NotApproved { .. } => "not_approved",
            ApprovalError::InsufficientApprovals { .. } => "insufficient_approvals",
            ApprovalError::EffectFailed { .. } => "effect_failed",
            ApprovalError::InvalidConfig(_) => "invalid_config",
        }
    }

    /// Whether retrying the same call later could succeed without a config change
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApprovalError::InsufficientApprovals { .. } | ApprovalError::EffectFailed { .. }
        )
    }
}

/// Result type for approval operations
pub type ApprovalResult<T> = Result<T, ApprovalError>;
