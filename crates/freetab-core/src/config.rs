//! Host configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeTabConfig {
    /// Length of a fade, in milliseconds
    pub fade_duration_ms: u64,
    /// Disable input on views while they fade out
    pub fade_toggles_interactivity: bool,
    /// Whether next/previous wrap around at the ends
    pub wrap: bool,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl FreeTabConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.log_filter.trim().is_empty() {
            return Err(CoreError::Config("log_filter must not be empty".to_string()));
        }
        tracing_subscriber::EnvFilter::try_new(&self.log_filter).map_err(|e| {
            CoreError::Config(format!("invalid log_filter {:?}: {e}", self.log_filter))
        })?;
        Ok(())
    }
}

impl Default for FreeTabConfig {
    fn default() -> Self {
        Self {
            fade_duration_ms: 100,
            fade_toggles_interactivity: true,
            wrap: true,
            log_filter: "info".to_string(),
        }
    }
}
