//! Configuration for the gesture controller.

use crate::core::decision::ActionTable;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Samples required per window with the default timing (2 s window at one
/// sample per 10 ms). Deliberately below the ~200 nominal slots: loop jitter
/// costs slots, and surplus slots on a clean run are absorbed by the
/// buffer's drop policy.
pub const DEFAULT_SAMPLES_PER_WINDOW: usize = 180;

/// Main configuration for the controller.
///
/// All values are fixed for a deployment; there is no runtime
/// reconfiguration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Minimum interval between sensor samples
    #[serde(with = "duration_millis")]
    pub sample_interval: Duration,

    /// Total duration of one capture window
    #[serde(with = "duration_millis")]
    pub window_duration: Duration,

    /// Samples per window; times 3 axes this is the classifier's
    /// required feature length
    pub samples_per_window: usize,

    /// Refractory period after an accepted trigger, absorbing switch bounce
    #[serde(with = "duration_millis")]
    pub trigger_refractory: Duration,

    /// Label-to-indicator action table
    pub actions: ActionTable,

    /// Path for storing telemetry counters
    pub data_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gesturewand");

        Self {
            sample_interval: Duration::from_millis(10),
            window_duration: Duration::from_secs(2),
            samples_per_window: DEFAULT_SAMPLES_PER_WINDOW,
            trigger_refractory: Duration::from_millis(200),
            actions: ActionTable::default(),
            data_path: data_dir,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gesturewand")
            .join("config.json")
    }

    /// Ensure all required directories exist.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.data_path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Scalar feature length the classifier requires for this deployment.
    pub fn feature_len(&self) -> usize {
        self.samples_per_window * crate::core::buffer::AXES_PER_SAMPLE
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Serde support for millisecond durations.
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
