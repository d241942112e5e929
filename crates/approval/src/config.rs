//! Wallet configuration
//!
//! The owner list and quorum are fixed for the lifetime of an engine, so the
//! configuration is read once at construction.

use crate::error::{ApprovalError, ApprovalResult};
use multisig_core::Principal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Largest accepted observation buffer
pub const MAX_EVENT_CAPACITY: usize = 1 << 20;

/// Construction parameters for an approval engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Owners in registration order
    pub owners: Vec<Principal>,

    /// Distinct owner approvals required before execution
    pub min_approvals: usize,

    /// Buffer size of the observation channel
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_event_capacity() -> usize {
    1024
}

impl WalletConfig {
    pub fn new(owners: Vec<Principal>, min_approvals: usize) -> Self {
        Self {
            owners,
            min_approvals,
            event_capacity: default_event_capacity(),
        }
    }

    /// Load configuration from a JSON file and validate it
    pub fn from_file(path: &Path) -> ApprovalResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ApprovalError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> ApprovalResult<Self> {
        let config: WalletConfig = serde_json::from_str(json)
            .map_err(|e| ApprovalError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check owner and quorum rules without building a registry
    pub fn validate(&self) -> ApprovalResult<()> {
        if self.owners.is_empty() {
            return Err(ApprovalError::InvalidConfig(
                "owner list cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.owners.len());
        for owner in &self.owners {
            if !seen.insert(owner) {
                return Err(ApprovalError::InvalidConfig(format!(
                    "duplicate owner: {}",
                    owner
                )));
            }
        }

        if self.min_approvals == 0 || self.min_approvals > self.owners.len() {
            return Err(ApprovalError::InvalidConfig(format!(
                "min_approvals must be in [1, {}], got {}",
                self.owners.len(),
                self.min_approvals
            )));
        }

        if self.event_capacity == 0 || self.event_capacity > MAX_EVENT_CAPACITY {
            return Err(ApprovalError::InvalidConfig(format!(
                "event_capacity must be in [1, {}], got {}",
                MAX_EVENT_CAPACITY, self.event_capacity
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn owners(ids: &[&str]) -> Vec<Principal> {
        ids.iter().map(|id| Principal::new(*id).unwrap()).collect()
    }

    #[test]
    fn test_valid_config() {
        let config = WalletConfig::new(owners(&["a", "b", "c"]), 2);
        assert!(config.validate().is_ok());
        assert_eq!(config.event_capacity, 1024);
    }

    #[test]
    fn test_empty_owners() {
        let config = WalletConfig::new(vec![], 1);
        assert!(matches!(
            config.validate(),
            Err(ApprovalError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_duplicate_owner() {
        let config = WalletConfig::new(owners(&["a", "b", "a"]), 2);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate owner: a"));
    }

    #[test]
    fn test_quorum_bounds() {
        assert!(WalletConfig::new(owners(&["a", "b"]), 0).validate().is_err());
        assert!(WalletConfig::new(owners(&["a", "b"]), 3).validate().is_err());
        assert!(WalletConfig::new(owners(&["a", "b"]), 2).validate().is_ok());
        assert!(WalletConfig::new(owners(&["a"]), 1).validate().is_ok());
    }

    #[test]
    fn test_event_capacity_bounds() {
        let mut config = WalletConfig::new(owners(&["a"]), 1);

        config.event_capacity = 0;
        assert!(config.validate().is_err());

        config.event_capacity = MAX_EVENT_CAPACITY;
        assert!(config.validate().is_ok());

        config.event_capacity = MAX_EVENT_CAPACITY + 1;
        assert!(matches!(
            config.validate(),
            Err(ApprovalError::InvalidConfig(_))
        ));

        let json = format!(
            r#"{{ "owners": ["a"], "min_approvals": 1, "event_capacity": {} }}"#,
            usize::MAX
        );
        assert!(matches!(
            WalletConfig::from_json(&json),
            Err(ApprovalError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "owners": ["alice", "bob"], "min_approvals": 1 }"#;
        let config = WalletConfig::from_json(json).unwrap();

        assert_eq!(config.owners.len(), 2);
        assert_eq!(config.event_capacity, 1024);
    }

    #[test]
    fn test_json_rejects_invalid_owner() {
        let json = r#"{ "owners": ["alice", ""], "min_approvals": 1 }"#;
        assert!(matches!(
            WalletConfig::from_json(json),
            Err(ApprovalError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "owners": ["o1", "o2", "o3"], "min_approvals": 2, "event_capacity": 16 }}"#
        )
        .unwrap();

        let config = WalletConfig::from_file(file.path()).unwrap();
        assert_eq!(config.min_approvals, 2);
        assert_eq!(config.event_capacity, 16);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = WalletConfig::from_file(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ApprovalError::InvalidConfig(_))));
    }
}
