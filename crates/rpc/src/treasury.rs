//! Treasury effect - in-memory balance debited by executed transactions

use async_trait::async_trait;
use multisig_approval::{EffectExecutor, EffectOutcome};
use multisig_core::{Amount, Payload, Target};
use tokio::sync::Mutex;
use tracing::info;

/// A payment made by the treasury
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub target: Target,
    pub value: Amount,
    pub payload_len: usize,
}

#[derive(Debug, Default)]
struct TreasuryState {
    balance: Amount,
    payments: Vec<Payment>,
}

/// Effect that pays out of a fixed balance and fails when it runs short
pub struct TreasuryEffect {
    state: Mutex<TreasuryState>,
}

impl TreasuryEffect {
    pub fn new(balance: Amount) -> Self {
        Self {
            state: Mutex::new(TreasuryState {
                balance,
                payments: Vec::new(),
            }),
        }
    }

    pub async fn balance(&self) -> Amount {
        self.state.lock().await.balance
    }

    pub async fn payments(&self) -> Vec<Payment> {
        self.state.lock().await.payments.clone()
    }

    /// Add funds, e.g. before retrying a failed execution
    pub async fn deposit(&self, value: Amount) -> Option<Amount> {
        let mut state = self.state.lock().await;
        state.balance = state.balance.checked_add(value)?;
        Some(state.balance)
    }
}

#[async_trait]
impl EffectExecutor for TreasuryEffect {
    fn name(&self) -> &str {
        "TreasuryEffect"
    }

    async fn run(&self, target: &Target, value: Amount, payload: &Payload) -> EffectOutcome {
        let mut state = self.state.lock().await;

        let Some(remaining) = state.balance.checked_sub(value) else {
            return EffectOutcome::failure(format!(
                "tx failed: balance {} is below {}",
                state.balance, value
            ));
        };

        state.balance = remaining;
        state.payments.push(Payment {
            target: target.clone(),
            value,
            payload_len: payload.len(),
        });

        info!(target = %target, value = %value, remaining = %remaining, "Treasury paid");
        EffectOutcome::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_pays_and_debits() {
        let treasury = TreasuryEffect::new(amount("1"));
        let target = Target::new("bob").unwrap();

        let outcome = treasury
            .run(&target, amount("0.4"), &Payload::new(vec![1, 2]))
            .await;

        assert!(outcome.is_success());
        assert_eq!(treasury.balance().await, amount("0.6"));
        assert_eq!(
            treasury.payments().await,
            vec![Payment {
                target,
                value: amount("0.4"),
                payload_len: 2
            }]
        );
    }

    #[tokio::test]
    async fn test_insufficient_balance_untouched() {
        let treasury = TreasuryEffect::new(amount("0.1"));
        let outcome = treasury
            .run(&Target::new("bob").unwrap(), amount("1"), &Payload::default())
            .await;

        assert!(matches!(outcome, EffectOutcome::Failure(ref r) if r.starts_with("tx failed")));
        assert_eq!(treasury.balance().await, amount("0.1"));
        assert!(treasury.payments().await.is_empty());

        assert_eq!(treasury.deposit(amount("2")).await, Some(amount("2.1")));
    }
}
