//! Locating the structured event log.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{Result, RimeLogError};
use crate::reporting::logging;
use crate::rime::config_script;
use crate::rime::directory::RimePaths;

/// Where a resolved log path came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogPathSource {
    /// `--log` or `log_path` in the config file
    Explicit,
    /// `log_file_path` of the named preset in the Lua config script
    Preset(String),
    /// The default file inside the Rime user directory
    Default,
}

impl fmt::Display for LogPathSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogPathSource::Explicit => write!(f, "configured"),
            LogPathSource::Preset(name) => write!(f, "preset '{name}'"),
            LogPathSource::Default => write!(f, "default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLogPath {
    pub path: PathBuf,
    pub source: LogPathSource,
}

/// Resolve the log file to analyze.
///
/// An explicit path wins. Otherwise the Rime user directory is required: the
/// active preset's `log_file_path` is used when set, else the default file.
/// An unreadable config script falls back to the default with a warning.
pub fn resolve_log_path(
    explicit: Option<PathBuf>,
    rime: Option<&RimePaths>,
) -> Result<ResolvedLogPath> {
    if let Some(path) = explicit {
        return Ok(ResolvedLogPath {
            path,
            source: LogPathSource::Explicit,
        });
    }

    let rime = rime.ok_or_else(|| {
        RimeLogError::RimeDirNotFound(
            "pass --rime-dir or --log, or set rime_dir in .rimelog.toml".to_string(),
        )
    })?;

    let script = rime.config_script();
    if script.is_file() {
        match fs::read_to_string(&script) {
            Ok(content) => {
                if let Some(path) = config_script::preset_log_path(&content)? {
                    let preset = config_script::active_preset(&content)?.unwrap_or_default();
                    return Ok(ResolvedLogPath {
                        path,
                        source: LogPathSource::Preset(preset),
                    });
                }
            }
            Err(e) => logging::log_warning(&format!(
                "Could not read {}: {e}; using the default log path",
                script.display()
            )),
        }
    }

    Ok(ResolvedLogPath {
        path: rime.default_log_file(),
        source: LogPathSource::Default,
    })
}
