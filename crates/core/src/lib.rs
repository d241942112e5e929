//! Multisig Core - Domain types
//!
//! Value types shared by the approval engine and its hosts:
//! - `Principal`: opaque identity of an owner or caller
//! - `Caller`: capability token carrying the identity asserted by the host
//! - `Target`: destination of an executed transaction
//! - `Amount`: non-negative decimal value
//! - `Payload`: opaque bytes delivered with the value

pub mod amount;
pub mod error;
pub mod identity;
pub mod payload;

pub use amount::Amount;
pub use error::{CoreError, CoreResult};
pub use identity::{Caller, Principal, Target};
pub use payload::Payload;
