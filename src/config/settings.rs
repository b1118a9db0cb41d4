//! Global relay settings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// How a broadcast schedules its per-endpoint submissions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastMode {
    /// All endpoints are driven at once
    #[default]
    Concurrent,
    /// One endpoint finishes before the next starts
    Sequential,
}

impl fmt::Display for BroadcastMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BroadcastMode::Concurrent => write!(f, "concurrent"),
            BroadcastMode::Sequential => write!(f, "sequential"),
        }
    }
}

/// Global settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Timeout applied to every chain client call, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Extra gas limit on top of the estimate, in percent
    #[serde(default = "default_margin")]
    pub gas_limit_margin_percent: u32,

    /// Extra gas price on top of the network quote, in percent
    #[serde(default = "default_margin")]
    pub gas_price_margin_percent: u32,

    /// Broadcast scheduling
    #[serde(default)]
    pub broadcast_mode: BroadcastMode,
}

fn default_timeout() -> u64 {
    30
}

fn default_margin() -> u32 {
    20
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            gas_limit_margin_percent: default_margin(),
            gas_price_margin_percent: default_margin(),
            broadcast_mode: BroadcastMode::default(),
        }
    }
}
