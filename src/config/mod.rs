//! Relay configuration: endpoints, contract artifacts and settings

mod endpoint;
mod file;
mod settings;

pub use endpoint::{parse_address, EndpointConfig};
pub use file::{env, ConfigFile, PublicConfig, StorageConfig};
pub use settings::{BroadcastMode, Settings};
