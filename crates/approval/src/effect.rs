//! Effect executor - the external capability that performs an approved action
//!
//! The engine decides whether a transaction may run; an `EffectExecutor`
//! supplied by the host actually moves the value and delivers the payload.

use async_trait::async_trait;
use multisig_core::{Amount, Payload, Target};

/// Outcome reported by an effect executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectOutcome {
    Success,
    Failure(String),
}

impl EffectOutcome {
    pub fn failure(reason: impl Into<String>) -> Self {
        EffectOutcome::Failure(reason.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, EffectOutcome::Success)
    }
}

/// Performs the value transfer / payload delivery for an executed transaction.
///
/// Called at most once per `execute` call. A `Failure` leaves the transaction
/// pending, so implementations must not partially apply a failed effect.
/// The `run` future must be driven to completion: a host that drops it
/// mid-run can leave an applied effect behind a still-pending transaction.
#[async_trait]
pub trait EffectExecutor: Send + Sync {
    /// Executor name for logging
    fn name(&self) -> &str;

    async fn run(&self, target: &Target, value: Amount, payload: &Payload) -> EffectOutcome;
}

/// Effect that accepts everything and does nothing
pub struct NoOpEffect;

#[async_trait]
impl EffectExecutor for NoOpEffect {
    fn name(&self) -> &str {
        "NoOpEffect"
    }

    async fn run(&self, _target: &Target, _value: Amount, _payload: &Payload) -> EffectOutcome {
        EffectOutcome::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_helpers() {
        assert!(EffectOutcome::Success.is_success());

        let failed = EffectOutcome::failure("tx failed");
        assert!(!failed.is_success());
        assert_eq!(failed, EffectOutcome::Failure("tx failed".to_string()));
    }

    #[tokio::test]
    async fn test_noop_effect() {
        let effect = NoOpEffect;
        let outcome = effect
            .run(&Target::new("vault").unwrap(), Amount::ZERO, &Payload::default())
            .await;

        assert!(outcome.is_success());
        assert_eq!(effect.name(), "NoOpEffect");
    }
}
