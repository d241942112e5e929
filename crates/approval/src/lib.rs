//! # Multisig Approval Module
//!
//! Quorum-authorized transaction execution for a fixed set of owners.
//!
//! ## Flow
//! - An owner submits a transaction (target, value, payload); it gets the next index
//! - Owners approve or revoke while the transaction is pending
//! - Once approvals reach the quorum, any owner may execute it
//! - Execution runs the host's `EffectExecutor` once; only success marks it executed
//!
//! ## Guarantees
//! - Only registered owners can act; the owner set never changes
//! - One approval per owner per transaction
//! - A transaction executes at most once, never below quorum
//! - Rejected calls change nothing and emit nothing

mod config;
mod effect;
mod engine;
mod error;
mod event;
mod ledger;
mod registry;
mod shared;
mod transaction;

pub use config::WalletConfig;
pub use effect::{EffectExecutor, EffectOutcome, NoOpEffect};
pub use engine::{ApprovalEngine, WalletStats};
pub use error::{ApprovalError, ApprovalResult};
pub use event::WalletEvent;
pub use ledger::TransactionLedger;
pub use registry::OwnerRegistry;
pub use shared::SharedEngine;
pub use transaction::{Approval, Transaction, TransactionStatus};
