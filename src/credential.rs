//! Signing key material for storage and verification endpoints

use crate::error::{ConfigError, Result, RpcError};
use alloy::signers::local::PrivateKeySigner;
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

/// Hex-encoded secp256k1 private key
///
/// The key text is wiped from memory when the credential is dropped. A signer
/// is only materialized for the duration of a single derive or sign call.
#[derive(Clone)]
pub struct Credential {
    key: Zeroizing<String>,
}

impl Credential {
    /// Create a credential from a hex private key (with or without `0x`)
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = Zeroizing::new(key.into());
        let trimmed = key.trim();
        let hex_part = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if hex_part.len() != 64 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidPrivateKey(
                "expected 32 bytes of hex".to_string(),
            )
            .into());
        }

        Ok(Self {
            key: Zeroizing::new(hex_part.to_ascii_lowercase()),
        })
    }

    /// Read a credential from an environment variable
    pub fn from_env(var: &str) -> Result<Self> {
        let value = std::env::var(var).map_err(|_| ConfigError::MissingEnv(var.to_string()))?;
        Self::new(value)
    }

    /// Build a local signer for one operation
    pub(crate) fn signer(&self) -> Result<PrivateKeySigner> {
        PrivateKeySigner::from_str(&self.key)
            .map_err(|e| RpcError::InvalidCredential(e.to_string()).into())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        *self.key == *other.key
    }
}

impl Eq for Credential {}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known anvil/hardhat account #0
    const ANVIL_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_credential_accepts_prefixed_and_bare() {
        let a = Credential::new(ANVIL_KEY).unwrap();
        let b = Credential::new(ANVIL_KEY.trim_start_matches("0x")).unwrap();
        assert_eq!(a, b);
        assert!(!a.key.starts_with("0x"));
    }

    #[test]
    fn test_credential_accepts_uppercase_prefix() {
        let upper = Credential::new(ANVIL_KEY.replacen("0x", "0X", 1)).unwrap();
        assert_eq!(upper, Credential::new(ANVIL_KEY).unwrap());

        let shouting = Credential::new(format!("0X{}", ANVIL_KEY[2..].to_ascii_uppercase())).unwrap();
        assert_eq!(
            shouting.signer().unwrap().address().to_string(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }

    #[test]
    fn test_credential_rejects_malformed() {
        assert!(Credential::new("").is_err());
        assert!(Credential::new("0x1234").is_err());
        assert!(Credential::new("zz".repeat(32)).is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let cred = Credential::new(ANVIL_KEY).unwrap();
        let printed = format!("{:?}", cred);
        assert_eq!(printed, "Credential(<redacted>)");
        assert!(!printed.contains("ac0974"));
    }

    #[test]
    fn test_signer_address() {
        let cred = Credential::new(ANVIL_KEY).unwrap();
        let address = cred.signer().unwrap().address();
        assert_eq!(
            address.to_string(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }
}
