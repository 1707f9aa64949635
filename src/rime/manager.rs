//! Install, uninstall and inspect the logger inside a Rime user directory.
//!
//! The manager never prompts; interactive choices are made by the caller and
//! passed in.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants::files;
use crate::core::error::{Result, RimeLogError};
use crate::core::types::Preset;
use crate::reporting::logging;
use crate::rime::config_script;
use crate::rime::directory::RimePaths;
use crate::rime::schema::{self, SchemaChange};

/// What happened to the Lua config script during install
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigScriptChange {
    /// Copied from the assets with the preset applied
    Copied,
    /// Existing script kept, only `preset_choice` rewritten
    PresetUpdated,
    /// Existing script kept untouched: it has no `preset_choice` line
    PresetLineMissing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// `custom` was chosen; nothing was written
    CustomPreset,
    Installed {
        preset: Preset,
        config_script: ConfigScriptChange,
        schema: SchemaChange,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UninstallOutcome {
    pub logger_removed: bool,
    pub config_removed: bool,
    pub schema: SchemaChange,
}

/// Registration state of the logger in the schema file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaState {
    Missing,
    Configured,
    NotConfigured,
    Unreadable(String),
}

/// Snapshot of the installation, as shown by `status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub user_dir: PathBuf,
    pub logger_script: PathBuf,
    pub logger_installed: bool,
    pub config_script: PathBuf,
    pub config_installed: bool,
    pub active_preset: Option<String>,
    pub schema_file: PathBuf,
    pub schema: SchemaState,
}

pub struct RimeManager {
    paths: RimePaths,
}

impl RimeManager {
    pub fn new(paths: RimePaths) -> Self {
        Self { paths }
    }

    /// Manager for `user_dir`, which must be an existing directory
    pub fn for_user_dir(user_dir: Option<PathBuf>, schema_file: &str) -> Result<Self> {
        let user_dir = user_dir.ok_or_else(|| {
            RimeLogError::RimeDirNotFound(
                "no known location exists; pass --rime-dir or set rime_dir in .rimelog.toml"
                    .to_string(),
            )
        })?;
        if !user_dir.is_dir() {
            return Err(RimeLogError::RimeDirNotFound(
                user_dir.display().to_string(),
            ));
        }
        Ok(Self::new(
            RimePaths::new(user_dir).with_schema_file(schema_file),
        ))
    }

    pub fn paths(&self) -> &RimePaths {
        &self.paths
    }

    /// Copy the logger scripts from `assets` and register the processor.
    ///
    /// The schema file must exist before anything is written. The logger
    /// script is always overwritten; an existing config script keeps the
    /// user's settings and only gets its preset switched.
    pub fn install(&self, assets: &Path, preset: Preset) -> Result<InstallOutcome> {
        if preset == Preset::Custom {
            return Ok(InstallOutcome::CustomPreset);
        }

        let schema_file = self.paths.schema_file();
        if !schema_file.is_file() {
            return Err(RimeLogError::FileNotFound(schema_file.display().to_string()));
        }

        let logger_asset = require_asset(assets, files::LOGGER_SCRIPT)?;
        let config_target = self.paths.config_script();
        let config_asset = if config_target.is_file() {
            None
        } else {
            Some(require_asset(assets, files::CONFIG_SCRIPT)?)
        };

        fs::create_dir_all(self.paths.lua_dir())?;

        let logger_target = self.paths.logger_script();
        fs::copy(&logger_asset, &logger_target)?;
        logging::log_file_change("Copied logger script", &logger_target);

        let config_change = match config_asset {
            Some(asset) => {
                let content = fs::read_to_string(&asset)?;
                let content = config_script::set_preset(&content, preset)?.unwrap_or(content);
                fs::write(&config_target, content)?;
                logging::log_file_change("Copied config script", &config_target);
                ConfigScriptChange::Copied
            }
            None => {
                let content = fs::read_to_string(&config_target)?;
                match config_script::set_preset(&content, preset)? {
                    Some(updated) => {
                        fs::write(&config_target, updated)?;
                        logging::log_file_change("Updated preset in", &config_target);
                        ConfigScriptChange::PresetUpdated
                    }
                    None => {
                        logging::log_warning(&format!(
                            "No preset_choice line in {}; left unchanged",
                            config_target.display()
                        ));
                        ConfigScriptChange::PresetLineMissing
                    }
                }
            }
        };

        let schema = schema::patch_schema_file(&schema_file)?;
        if let SchemaChange::Updated { ref backup } = schema {
            logging::log_file_change("Backed up schema to", backup);
            logging::log_file_change("Registered logger in", &schema_file);
        }

        Ok(InstallOutcome::Installed {
            preset,
            config_script: config_change,
            schema,
        })
    }

    /// Remove the logger script and unregister the processor.
    ///
    /// The config script is removed only when `remove_config` is set.
    pub fn uninstall(&self, remove_config: bool) -> Result<UninstallOutcome> {
        let logger_removed = remove_if_exists(&self.paths.logger_script())?;
        let config_removed = if remove_config {
            remove_if_exists(&self.paths.config_script())?
        } else {
            false
        };

        let schema_file = self.paths.schema_file();
        let schema = schema::revert_schema_file(&schema_file)?;
        if let SchemaChange::Updated { ref backup } = schema {
            logging::log_file_change("Backed up schema to", backup);
            logging::log_file_change("Unregistered logger from", &schema_file);
        }

        Ok(UninstallOutcome {
            logger_removed,
            config_removed,
            schema,
        })
    }

    pub fn status(&self) -> StatusReport {
        let config_script = self.paths.config_script();
        let active_preset = fs::read_to_string(&config_script)
            .ok()
            .and_then(|content| config_script::active_preset(&content).ok().flatten());

        let schema_file = self.paths.schema_file();
        let schema = if !schema_file.is_file() {
            SchemaState::Missing
        } else {
            match fs::read_to_string(&schema_file) {
                Ok(content) if schema::is_configured(&content) => SchemaState::Configured,
                Ok(_) => SchemaState::NotConfigured,
                Err(e) => SchemaState::Unreadable(e.to_string()),
            }
        };

        StatusReport {
            user_dir: self.paths.user_dir().to_path_buf(),
            logger_script: self.paths.logger_script(),
            logger_installed: self.paths.logger_script().is_file(),
            config_installed: config_script.is_file(),
            config_script,
            active_preset,
            schema_file,
            schema,
        }
    }
}

fn require_asset(assets: &Path, name: &str) -> Result<PathBuf> {
    let path = assets.join(name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(RimeLogError::FileNotFound(path.display().to_string()))
    }
}

fn remove_if_exists(path: &Path) -> Result<bool> {
    if !path.is_file() {
        return Ok(false);
    }
    fs::remove_file(path)?;
    logging::log_file_change("Removed", path);
    Ok(true)
}
