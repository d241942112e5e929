//! Call scripts - one JSON call per line
//!
//! ```text
//! {"op":"submit","caller":"owner1","target":"0xvault","value":"0.1","payload":"0x626c6f62"}
//! {"op":"approve","caller":"owner1","index":0}
//! {"op":"revoke","caller":"owner1","index":0}
//! {"op":"execute","caller":"owner3","index":0}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use multisig_core::{Amount, Caller, Payload, Principal, Target};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid call on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// A single call into the engine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Call {
    Submit {
        caller: Principal,
        target: Target,
        #[serde(default)]
        value: Amount,
        #[serde(default)]
        payload: Payload,
    },
    Approve {
        caller: Principal,
        index: u64,
    },
    Revoke {
        caller: Principal,
        index: u64,
    },
    Execute {
        caller: Principal,
        index: u64,
    },
}

impl Call {
    pub fn op(&self) -> &'static str {
        match self {
            Call::Submit { .. } => "submit",
            Call::Approve { .. } => "approve",
            Call::Revoke { .. } => "revoke",
            Call::Execute { .. } => "execute",
        }
    }

    /// The host vouches for the principal named in the script
    pub fn caller(&self) -> Caller {
        let principal = match self {
            Call::Submit { caller, .. }
            | Call::Approve { caller, .. }
            | Call::Revoke { caller, .. }
            | Call::Execute { caller, .. } => caller,
        };
        Caller::assert(principal.clone())
    }
}

/// A parsed call with its 1-based source line
#[derive(Debug, Clone)]
pub struct ScriptLine {
    pub line: usize,
    pub call: Call,
}

pub fn parse_script(content: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut calls = Vec::new();

    for (i, raw) in content.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let call = serde_json::from_str(trimmed).map_err(|source| ScriptError::Parse {
            line: i + 1,
            source,
        })?;
        calls.push(ScriptLine { line: i + 1, call });
    }

    Ok(calls)
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptLine>, ScriptError> {
    let content = std::fs::read_to_string(path)?;
    parse_script(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_ops() {
        let script = r#"
# setup
{"op":"submit","caller":"owner1","target":"vault","value":"0.5","payload":"0x626c6f62"}
{"op":"approve","caller":"owner1","index":0}

{"op":"revoke","caller":"owner1","index":0}
{"op":"execute","caller":"owner3","index":0}
"#;
        let calls = parse_script(script).unwrap();

        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0].line, 3);
        assert_eq!(calls[3].line, 7);

        let ops: Vec<&str> = calls.iter().map(|c| c.call.op()).collect();
        assert_eq!(ops, vec!["submit", "approve", "revoke", "execute"]);

        match &calls[0].call {
            Call::Submit { value, payload, .. } => {
                assert_eq!(value.to_string(), "0.5");
                assert_eq!(payload.as_bytes(), b"blob");
            }
            other => panic!("expected submit, got {:?}", other),
        }
        assert_eq!(calls[3].call.caller().principal().as_str(), "owner3");
    }

    #[test]
    fn test_submit_defaults() {
        let calls = parse_script(r#"{"op":"submit","caller":"o1","target":"t"}"#).unwrap();
        match &calls[0].call {
            Call::Submit { value, payload, .. } => {
                assert!(value.is_zero());
                assert!(payload.is_empty());
            }
            other => panic!("expected submit, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_reports_line() {
        let script = "{\"op\":\"approve\",\"caller\":\"o1\",\"index\":0}\n{\"op\":\"transfer\"}";
        let err = parse_script(script).unwrap_err();
        assert!(matches!(err, ScriptError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_negative_value_rejected() {
        let script = r#"{"op":"submit","caller":"o1","target":"t","value":"-1"}"#;
        assert!(matches!(
            parse_script(script),
            Err(ScriptError::Parse { line: 1, .. })
        ));
    }
}
