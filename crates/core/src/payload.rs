//! Opaque payload delivered to the target on execution

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Opaque byte payload.
///
/// Serialized as a lowercase hex string; an optional `0x` prefix is accepted
/// when parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Payload(Vec<u8>);

impl Payload {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn from_hex(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix("0x").unwrap_or(s);
        hex::decode(s)
            .map(Self)
            .map_err(|e| CoreError::InvalidHex(e.to_string()))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// SHA-256 of the payload bytes, hex encoded
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.0);
        hex::encode(hasher.finalize())
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl TryFrom<String> for Payload {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Payload> for String {
    fn from(payload: Payload) -> Self {
        payload.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_prefix_optional() {
        let a = Payload::from_hex("0x626c6f62").unwrap();
        let b = Payload::from_hex("626c6f62").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_bytes(), b"blob");
        assert_eq!(a.to_string(), "0x626c6f62");
    }

    #[test]
    fn test_invalid_hex() {
        assert!(matches!(
            Payload::from_hex("0xzz"),
            Err(CoreError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_empty_payload() {
        let payload = Payload::from_hex("").unwrap();
        assert!(payload.is_empty());
        assert_eq!(payload.len(), 0);
    }

    #[test]
    fn test_digest() {
        let blob = Payload::new(b"blob".to_vec());
        assert_eq!(blob.digest(), blob.clone().digest());
        assert_ne!(blob.digest(), Payload::default().digest());
        assert_eq!(blob.digest().len(), 64);
    }
}
