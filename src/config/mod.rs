//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants::{files, output_formats};
use crate::core::error::{Result, RimeLogError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Rime user directory, skipping auto-detection
    pub rime_dir: Option<String>,

    /// Event log to analyze, skipping preset resolution
    pub log_path: Option<String>,

    /// Destination of the mis-prediction report
    pub report_path: Option<String>,

    /// Directory holding the Lua scripts copied by `install`
    pub assets_dir: Option<String>,

    /// Schema file patched to register the logger
    pub schema_file: Option<String>,

    /// Output format for `analyze` (text, json)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rime_dir: None, // Detected per operating system
            log_path: None, // Resolved from the active preset
            report_path: None,
            assets_dir: None,
            schema_file: Some(files::SCHEMA_FILE.to_string()),
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RimeLogError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let parsed: Config = toml::from_str(&content).map_err(|e| {
            RimeLogError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::default().overlay(parsed);
        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        match std::env::current_dir() {
            Ok(cwd) => Self::load_from_dir(&cwd),
            Err(_) => Self::default(),
        }
    }

    /// Look for `.rimelog.toml` in `start` and up to three parent directories
    pub fn load_from_dir(start: &Path) -> Self {
        for dir in start.ancestors().take(files::CONFIG_SEARCH_DEPTH + 1) {
            let candidate = dir.join(files::CONFIG_FILE);
            if candidate.is_file() {
                if let Ok(config) = Self::load_from_file(&candidate) {
                    return config;
                }
            }
        }

        // Fall back to defaults
        Self::default()
    }

    /// Fill unset values of a parsed file from defaults
    fn overlay(mut self, parsed: Config) -> Self {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if parsed.$field.is_some() {
                    self.$field = parsed.$field;
                })*
            };
        }
        take!(
            rime_dir,
            log_path,
            report_path,
            assets_dir,
            schema_file,
            output_format,
            verbose
        );
        self
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(ref rime_dir) = cli_config.rime_dir {
            self.rime_dir = Some(rime_dir.clone());
        }
        if let Some(ref log_path) = cli_config.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(ref report_path) = cli_config.report_path {
            self.report_path = Some(report_path.clone());
        }
        if let Some(ref assets_dir) = cli_config.assets_dir {
            self.assets_dir = Some(assets_dir.clone());
        }

        // Output & format
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
    }

    pub fn rime_dir_path(&self) -> Option<PathBuf> {
        self.rime_dir.as_ref().map(PathBuf::from)
    }

    pub fn log_path_buf(&self) -> Option<PathBuf> {
        self.log_path.as_ref().map(PathBuf::from)
    }

    pub fn report_path_buf(&self) -> Option<PathBuf> {
        self.report_path.as_ref().map(PathBuf::from)
    }

    pub fn assets_dir_path(&self) -> PathBuf {
        PathBuf::from(
            self.assets_dir
                .as_deref()
                .unwrap_or(files::DEFAULT_ASSETS_DIR),
        )
    }

    pub fn schema_file_name(&self) -> &str {
        self.schema_file.as_deref().unwrap_or(files::SCHEMA_FILE)
    }

    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let paths = [
            ("rime_dir", &self.rime_dir),
            ("log_path", &self.log_path),
            ("report_path", &self.report_path),
            ("assets_dir", &self.assets_dir),
        ];
        for (name, value) in paths {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(RimeLogError::Config(format!(
                    "'{name}' cannot be empty. Remove it to use the default."
                )));
            }
        }

        if let Some(ref schema_file) = self.schema_file {
            let name = schema_file.trim();
            if name.is_empty() || name.contains('/') || name.contains('\\') {
                return Err(RimeLogError::Config(format!(
                    "Schema file '{schema_file}' is invalid. Expected a file name inside the Rime user directory."
                )));
            }
        }

        // Validate output format
        if let Some(ref format) = self.output_format {
            match format.as_str() {
                f if output_formats::ALL.contains(&f) => {}
                _ => {
                    return Err(RimeLogError::Config(format!(
                        "Invalid output format '{format}'. Expected one of: {}.",
                        output_formats::ALL.join(", ")
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Locations
    pub rime_dir: Option<String>,    // --rime-dir
    pub log_path: Option<String>,    // --log
    pub report_path: Option<String>, // export-misses --output
    pub assets_dir: Option<String>,  // install --assets

    // Output & format
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // analyze --format

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.rime_dir, None);
        assert_eq!(config.log_path, None);
        assert_eq!(config.schema_file_name(), files::SCHEMA_FILE);
        assert_eq!(config.output_format(), output_formats::DEFAULT);
        assert_eq!(config.verbose, Some(false));
        assert_eq!(config.assets_dir_path(), PathBuf::from("assets"));
    }

    #[test]
    fn test_config_load_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(
            b"rime_dir = \"/opt/rime\"\nlog_path = \"/var/log/habit.jsonl\"\noutput_format = \"json\"",
        )?;

        let config = Config::load_from_file(file.path())?;
        assert_eq!(config.rime_dir_path(), Some(PathBuf::from("/opt/rime")));
        assert_eq!(
            config.log_path_buf(),
            Some(PathBuf::from("/var/log/habit.jsonl"))
        );
        assert_eq!(config.output_format(), "json");
        // Unset values keep their defaults
        assert_eq!(config.schema_file_name(), files::SCHEMA_FILE);
        assert_eq!(config.verbose, Some(false));

        Ok(())
    }

    #[test]
    fn test_config_load_from_file_rejects_unknown_fields() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"timeout = 30")?;

        let result = Config::load_from_file(file.path());
        assert!(matches!(result, Err(RimeLogError::Config(_))));
        Ok(())
    }

    #[test]
    fn test_config_load_from_missing_file() {
        let result = Config::load_from_file("/definitely/not/here/.rimelog.toml");
        match result {
            Err(RimeLogError::Config(msg)) => assert!(msg.contains("Could not read config file")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_config_load_from_dir_searches_parents() -> Result<()> {
        let root = tempfile::tempdir()?;
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested)?;
        fs::write(
            root.path().join(files::CONFIG_FILE),
            "report_path = \"/tmp/misses.csv\"",
        )?;

        let config = Config::load_from_dir(&nested);
        assert_eq!(
            config.report_path_buf(),
            Some(PathBuf::from("/tmp/misses.csv"))
        );
        Ok(())
    }

    #[test]
    fn test_config_load_from_dir_without_file() -> Result<()> {
        let root = tempfile::tempdir()?;
        let config = Config::load_from_dir(root.path());
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_config_merge_with_cli() {
        let mut config = Config {
            log_path: Some("/from/file.jsonl".to_string()),
            ..Default::default()
        };
        let cli_config = CliConfig {
            log_path: Some("/from/cli.jsonl".to_string()),
            rime_dir: Some("/rime".to_string()),
            output_format: Some("json".to_string()),
            verbose: true,
            ..Default::default()
        };

        config.merge_with_cli(&cli_config);

        assert_eq!(config.log_path.as_deref(), Some("/from/cli.jsonl"));
        assert_eq!(config.rime_dir.as_deref(), Some("/rime"));
        assert_eq!(config.output_format(), "json");
        assert_eq!(config.verbose, Some(true));
    }

    #[test]
    fn test_config_merge_keeps_file_values_when_cli_unset() {
        let mut config = Config {
            report_path: Some("/file/report.csv".to_string()),
            ..Default::default()
        };

        config.merge_with_cli(&CliConfig::default());

        assert_eq!(config.report_path.as_deref(), Some("/file/report.csv"));
        assert_eq!(config.verbose, Some(false));
    }

    #[test]
    fn test_validate_output_format() {
        let config = Config {
            output_format: Some("xml".to_string()),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(format!("{err}").contains("Invalid output format 'xml'"));

        for format in output_formats::ALL {
            let config = Config {
                output_format: Some(format.to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_validate_empty_paths() {
        let config = Config {
            log_path: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_schema_file_name() {
        let config = Config {
            schema_file: Some("../escape.yaml".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            schema_file: Some("luna_pinyin.schema.yaml".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
