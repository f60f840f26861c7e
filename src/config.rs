//! Changer configuration
//!
//! Settings are read from a JSON file; command-line flags override them.

use crate::changer::DEFAULT_COMMAND;
use crate::error::{Result, RustMtxError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangerConfig {
    /// Changer device, e.g. `/dev/sg3`
    pub device: Option<String>,
    /// Changer-control program
    pub command: String,
    /// Refresh the inventory before each move so records come from the device
    pub refresh_before_move: bool,
}

impl Default for ChangerConfig {
    fn default() -> Self {
        Self {
            device: None,
            command: DEFAULT_COMMAND.to_string(),
            refresh_before_move: true,
        }
    }
}

impl ChangerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RustMtxError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            RustMtxError::config(format!("invalid config {}: {}", path.display(), e))
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// `<config dir>/rustmtx/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rustmtx").join("config.json"))
    }

    /// An explicit path must exist; the default location is optional.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, device: Option<String>, command: Option<String>) -> Self {
        if device.is_some() {
            self.device = device;
        }
        if let Some(command) = command {
            self.command = command;
        }
        self
    }
}
