//! Owner registry - the fixed set of principals allowed to act on the wallet

use crate::config::WalletConfig;
use crate::error::ApprovalResult;
use multisig_core::Principal;
use std::collections::HashSet;

/// Immutable owner set plus the approval quorum
#[derive(Debug, Clone)]
pub struct OwnerRegistry {
    owners: Vec<Principal>,
    lookup: HashSet<Principal>,
    min_approvals: usize,
}

impl OwnerRegistry {
    /// Build a registry, failing with `InvalidConfig` on an empty or duplicated
    /// owner list or a quorum outside `[1, owners]`
    pub fn new(owners: Vec<Principal>, min_approvals: usize) -> ApprovalResult<Self> {
        Self::from_config(&WalletConfig::new(owners, min_approvals))
    }

    pub fn from_config(config: &WalletConfig) -> ApprovalResult<Self> {
        config.validate()?;
        Ok(Self {
            lookup: config.owners.iter().cloned().collect(),
            owners: config.owners.clone(),
            min_approvals: config.min_approvals,
        })
    }

    pub fn is_owner(&self, principal: &Principal) -> bool {
        self.lookup.contains(principal)
    }

    pub fn quorum(&self) -> usize {
        self.min_approvals
    }

    /// Owners in registration order
    pub fn owners(&self) -> &[Principal] {
        &self.owners
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApprovalError;

    fn p(id: &str) -> Principal {
        Principal::new(id).unwrap()
    }

    #[test]
    fn test_membership() {
        let registry = OwnerRegistry::new(vec![p("o1"), p("o2"), p("o3")], 2).unwrap();

        assert!(registry.is_owner(&p("o2")));
        assert!(!registry.is_owner(&p("o4")));
        assert_eq!(registry.quorum(), 2);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.owners()[0], p("o1"));
    }

    #[test]
    fn test_invalid_construction() {
        assert!(matches!(
            OwnerRegistry::new(vec![], 1),
            Err(ApprovalError::InvalidConfig(_))
        ));
        assert!(matches!(
            OwnerRegistry::new(vec![p("o1"), p("o1")], 1),
            Err(ApprovalError::InvalidConfig(_))
        ));
        assert!(matches!(
            OwnerRegistry::new(vec![p("o1")], 2),
            Err(ApprovalError::InvalidConfig(_))
        ));
    }
}
