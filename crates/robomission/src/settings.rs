//! Mission settings file.
//!
//! ```yaml
//! log_path: "log"
//! tick_interval_ms: 2
//! missions:
//!   plan401: { log: true, run: false, print: true }
//! ```

use crate::clock::DEFAULT_TICK_INTERVAL_MS;
use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Per-mission switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    /// Write `log_<name>.txt`
    pub log: bool,
    /// Execute at all; a disabled mission is a no-op
    pub run: bool,
    /// Mirror log records to the console
    pub print: bool,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            log: true,
            run: false,
            print: true,
        }
    }
}

/// Settings shared by all missions on a robot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionSettings {
    /// Directory for mission log files
    pub log_path: PathBuf,
    pub tick_interval_ms: u64,
    pub missions: BTreeMap<String, MissionConfig>,
}

impl Default for MissionSettings {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("log"),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            missions: BTreeMap::new(),
        }
    }
}

impl MissionSettings {
    /// Parse settings from YAML.
    ///
    /// # Errors
    /// Returns error on malformed YAML or a zero tick interval.
    pub fn from_yaml(yaml: &str) -> Result<Self, SettingsError> {
        let settings: Self =
            serde_yaml_ng::from_str(yaml).map_err(|e| SettingsError::Parse(e.to_string()))?;
        if settings.tick_interval_ms == 0 {
            return Err(SettingsError::ZeroTickInterval);
        }
        Ok(settings)
    }

    /// Load settings from a file. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_yaml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "settings file not found, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Write settings back to a file.
    ///
    /// # Errors
    /// Returns error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let content =
            serde_yaml_ng::to_string(self).map_err(|e| SettingsError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Switches for a mission, defaults when it has no section.
    pub fn mission(&self, name: &str) -> MissionConfig {
        self.missions.get(name).copied().unwrap_or_default()
    }

    /// Insert default switches for a mission without a section.
    ///
    /// Returns true when the settings changed and should be saved.
    pub fn ensure_mission(&mut self, name: &str) -> bool {
        if self.missions.contains_key(name) {
            return false;
        }
        self.missions.insert(name.to_string(), MissionConfig::default());
        true
    }

    /// Poll interval, never zero.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}
