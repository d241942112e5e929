//! Multisig RPC - CLI host for the approval engine
//!
//! Loads a wallet config, supplies a treasury-backed effect and drives the
//! engine from call scripts.

pub mod commands;
pub mod context;
pub mod script;
pub mod treasury;

pub use context::{AppContext, CallOutcome};
pub use treasury::TreasuryEffect;
