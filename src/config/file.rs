//! Configuration file handling

use super::{EndpointConfig, Settings};
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable names used by existing deployments
pub mod env {
    pub const PUBLIC_ABI_PATH: &str = "ETH_VERIFICATION_CONTRACT_PATH";
    pub const PUBLIC_URL: &str = "ETH_VERIFICATION_INFURA_URL";
    pub const PUBLIC_CONTRACT_ADDRESS: &str = "ETH_VERIFICATION_CONTRACT_ADDRESS";
    pub const STORAGE_ABI_PATH: &str = "ETH_STORAGE_CONTRACT_PATH";
    pub const STORAGE_URL_PREFIX: &str = "ETH_STORAGE_INFURA_URL_";
    pub const STORAGE_CONTRACT_ADDRESS_PREFIX: &str = "ETH_STORAGE_CONTRACT_ADDRESS_";
    pub const STORAGE_KEY_PREFIX: &str = "ETH_STORAGE_KEY_";
}

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Public verification endpoint
    pub public: PublicConfig,

    /// Redundant storage endpoints
    pub storage: StorageConfig,
}

/// Public verification network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicConfig {
    /// Contract artifact containing the verification ABI
    pub abi_path: PathBuf,

    #[serde(flatten)]
    pub endpoint: EndpointConfig,
}

/// Redundant storage network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Contract artifact shared by every storage endpoint
    pub abi_path: PathBuf,

    /// Storage endpoints in registration order
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

impl ConfigFile {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eth-storage-relay")
            .join("config.toml")
    }

    /// Load from default path
    pub fn load_default() -> Result<Option<Self>> {
        let path = Self::default_path();
        if path.exists() {
            Ok(Some(Self::load(&path)?))
        } else {
            Ok(None)
        }
    }

    /// Load from a specific path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::InvalidFile(format!("{}: {}", path.display(), e)))?;

        let config: Self = toml::from_str(&content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Save to a specific path
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::InvalidFile(format!("Failed to create directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidFile(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::InvalidFile(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Build from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    ///
    /// Storage endpoints are numbered from 1 and read until the first missing
    /// URL variable. Keys are referenced by variable name, never copied.
    pub fn from_env_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| lookup(name).ok_or_else(|| ConfigError::MissingEnv(name.to_string()));

        let public = PublicConfig {
            abi_path: PathBuf::from(require(env::PUBLIC_ABI_PATH)?),
            endpoint: EndpointConfig::new(
                require(env::PUBLIC_URL)?,
                require(env::PUBLIC_CONTRACT_ADDRESS)?,
            ),
        };

        let mut endpoints = Vec::new();
        for n in 1.. {
            let Some(url) = lookup(&format!("{}{}", env::STORAGE_URL_PREFIX, n)) else {
                break;
            };
            let address = require(&format!("{}{}", env::STORAGE_CONTRACT_ADDRESS_PREFIX, n))?;
            endpoints.push(
                EndpointConfig::new(url, address)
                    .with_private_key_env(format!("{}{}", env::STORAGE_KEY_PREFIX, n)),
            );
        }

        if endpoints.is_empty() {
            return Err(ConfigError::MissingEnv(format!("{}1", env::STORAGE_URL_PREFIX)).into());
        }

        Ok(Self {
            settings: Settings::default(),
            public,
            storage: StorageConfig {
                abi_path: PathBuf::from(require(env::STORAGE_ABI_PATH)?),
                endpoints,
            },
        })
    }

    /// Copy with inline secrets masked
    pub fn redacted(&self) -> Self {
        let mut shown = self.clone();
        shown.public.endpoint = shown.public.endpoint.redacted();
        shown.storage.endpoints = shown
            .storage
            .endpoints
            .iter()
            .map(EndpointConfig::redacted)
            .collect();
        shown
    }
}
