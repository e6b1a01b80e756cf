//! Optional YAML configuration for the `chaintrace` binary.
//!
//! ```yaml
//! log:
//!   level: debug
//!   components:
//!     chaintrace-evm: trace
//!   json: false
//! output:
//!   json: true
//!   tree: false
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::logging::LogConfig;

/// How `resolve` prints its result when no flag says otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print the result as JSON
    #[serde(default)]
    pub json: bool,
    /// Print the reconstructed call tree
    #[serde(default)]
    pub tree: bool,
}

/// Top-level CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl CliConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        // An empty file deserialises to unit, not a mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).context("invalid config YAML")
    }

    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config '{}'", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("in config '{}'", path.display()))
    }

    /// Command-line flags take precedence over file values.
    pub fn apply_flags(&mut self, log_level: Option<&str>, log_json: bool) {
        if let Some(level) = log_level {
            self.log.level = level.to_string();
        }
        self.log.json |= log_json;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = CliConfig::from_yaml("output:\n  tree: true\n").unwrap();
        assert!(config.output.tree);
        assert!(!config.output.json);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn full_yaml() {
        let config = CliConfig::from_yaml(
            "log:\n  level: debug\n  components:\n    chaintrace-evm: trace\n  json: true\noutput:\n  json: true\n",
        )
        .unwrap();
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.components["chaintrace-evm"], "trace");
        assert!(config.log.json);
        assert!(config.output.json);
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(CliConfig::from_yaml("").unwrap(), CliConfig::default());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(CliConfig::from_yaml("log: [").is_err());
    }

    #[test]
    fn flags_override_file() {
        let mut config = CliConfig::from_yaml("log:\n  level: error\n").unwrap();
        config.apply_flags(Some("debug"), true);
        assert_eq!(config.log.level, "debug");
        assert!(config.log.json);

        let mut config = CliConfig::default();
        config.apply_flags(None, false);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = CliConfig::load(Some(Path::new("/nonexistent/chaintrace.yaml"))).unwrap_err();
        assert!(err.to_string().contains("cannot read config"));
    }
}
