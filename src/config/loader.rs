//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the intake
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::IntakeConfig;

/// Loads and provides access to the intake configuration.
///
/// # Example
///
/// ```no_run
/// use award_intake::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/intake.yaml")?;
/// println!("Fiscal prefix: {}", loader.config().fiscal_year_prefix);
/// # Ok::<(), award_intake::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: IntakeConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML file (e.g., "./config/intake.yaml")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file is not valid YAML or lacks a required field (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config = Self::parse(&path_str, &content)?;
        debug!(path = %path_str, prefix = %config.fiscal_year_prefix, "Configuration loaded");
        Ok(Self { config })
    }

    /// Parses configuration text; `origin` names the source in errors.
    pub fn parse(origin: &str, content: &str) -> EngineResult<IntakeConfig> {
        let config: IntakeConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        if config.fiscal_year_prefix.trim().is_empty() {
            return Err(EngineError::ConfigParseError {
                path: origin.to_string(),
                message: "fiscal_year_prefix must not be empty".to_string(),
            });
        }
        if config.actions.move_files && config.paths.archive_dir.is_none() {
            return Err(EngineError::ConfigParseError {
                path: origin.to_string(),
                message: "actions.move_files requires paths.archive_dir".to_string(),
            });
        }

        Ok(config)
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> IntakeConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_path() -> &'static str {
        "./config/intake.yaml"
    }

    #[test]
    fn test_load_sample_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let config = result.unwrap().into_config();
        assert_eq!(config.fiscal_year_prefix, "24");
        assert!(config.actions.write_rows);
        assert!(!config.actions.move_files);
    }

    #[test]
    fn test_missing_file_returns_config_not_found() {
        match ConfigLoader::load("./config/does-not-exist.yaml") {
            Err(EngineError::ConfigNotFound { path }) => assert!(path.contains("does-not-exist")),
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_actions_default_when_omitted() {
        let yaml = "
fiscal_year_prefix: \"25\"
paths:
  spreadsheet_rows: rows.txt
  audit_log: audit.txt
  counter_store: counter.json
";
        let config = ConfigLoader::parse("inline", yaml).unwrap();
        assert_eq!(config.log_filter, "info");
        assert!(config.actions.update_counter);
        assert!(!config.actions.print_records);
        assert!(config.paths.archive_dir.is_none());
    }

    #[test]
    fn test_missing_required_field_is_parse_error() {
        let yaml = "fiscal_year_prefix: \"25\"\n";
        assert!(matches!(
            ConfigLoader::parse("inline", yaml),
            Err(EngineError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_move_without_archive_dir_is_rejected() {
        let yaml = "
fiscal_year_prefix: \"25\"
paths:
  spreadsheet_rows: rows.txt
  audit_log: audit.txt
  counter_store: counter.json
actions:
  move_files: true
";
        match ConfigLoader::parse("inline", yaml) {
            Err(EngineError::ConfigParseError { message, .. }) => assert!(message.contains("archive_dir")),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }
}
