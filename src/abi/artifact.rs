//! Truffle/Hardhat artifact loading
//!
//! Artifacts are JSON objects carrying the contract ABI under an `abi` key.
//! A bare ABI array is accepted as well.

use crate::error::{ConfigError, Result};
use alloy::json_abi::JsonAbi;
use std::path::Path;

/// Load a contract ABI from an artifact file
pub fn load_artifact(path: &Path) -> Result<JsonAbi> {
    if !path.exists() {
        return Err(ConfigError::Artifact(format!("{}: file not found", path.display())).into());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Artifact(format!("{}: {}", path.display(), e)))?;

    parse_artifact(&content)
        .map_err(|e| ConfigError::Artifact(format!("{}: {}", path.display(), e)).into())
}

/// Parse an artifact document into its ABI
pub fn parse_artifact(content: &str) -> std::result::Result<JsonAbi, String> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| format!("invalid JSON: {}", e))?;

    let abi_value = match value {
        serde_json::Value::Object(mut map) => map
            .remove("abi")
            .ok_or_else(|| "artifact has no `abi` field".to_string())?,
        array @ serde_json::Value::Array(_) => array,
        _ => return Err("expected an artifact object or ABI array".to_string()),
    };

    serde_json::from_value(abi_value).map_err(|e| format!("invalid ABI: {}", e))
}
