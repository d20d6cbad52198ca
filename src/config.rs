//! Run-time configuration for the machine.

use crate::types::SimulatorError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Cells cleared after the separator before a result is written.
///
/// This is a fixed capacity, not derived from the operands: second operands wider
/// than the window leave stale digits on the tape.
pub const DEFAULT_ERASE_WINDOW: usize = 40;
/// Cells shown around the head in each recorded description.
pub const DEFAULT_TRACE_WINDOW: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub erase_window: usize,
    pub trace_window: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            erase_window: DEFAULT_ERASE_WINDOW,
            trace_window: DEFAULT_TRACE_WINDOW,
        }
    }
}

impl Config {
    /// Reads and validates a JSON configuration file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, SimulatorError> {
        let content = fs::read_to_string(path).map_err(|e| {
            SimulatorError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parses and validates JSON configuration content.
    pub fn from_json(content: &str) -> Result<Self, SimulatorError> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimulatorError> {
        if self.erase_window == 0 {
            return Err(SimulatorError::ValidationError(
                "erase_window must be at least 1".to_string(),
            ));
        }
        if self.trace_window == 0 {
            return Err(SimulatorError::ValidationError(
                "trace_window must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.erase_window, 40);
        assert_eq!(config.trace_window, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "trace_window": 20 }"#).unwrap();

        assert_eq!(config.trace_window, 20);
        assert_eq!(config.erase_window, DEFAULT_ERASE_WINDOW);
    }

    #[test]
    fn test_zero_window_rejected() {
        let result = Config::from_json(r#"{ "erase_window": 0 }"#);
        assert!(matches!(result, Err(SimulatorError::ValidationError(_))));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = Config::from_json(r#"{ "window": 10 }"#);
        assert!(matches!(result, Err(SimulatorError::ConfigError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("machine.json");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(br#"{ "erase_window": 64, "trace_window": 30 }"#).unwrap();

        let config = Config::load(&file_path).unwrap();
        assert_eq!(
            config,
            Config {
                erase_window: 64,
                trace_window: 30
            }
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = Config::load(&dir.path().join("missing.json"));

        assert!(matches!(result, Err(SimulatorError::FileError(_))));
    }
}
