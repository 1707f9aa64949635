use crate::analysis::{EventLog, SkippedLine};
use crate::config::Config;
use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "auto".to_string());

    info!(
        "Configuration: rime_dir={}, log_path={}, report_path={}",
        show(&config.rime_dir),
        show(&config.log_path),
        show(&config.report_path)
    );
    info!(
        "Install: assets_dir={}, schema_file={}",
        show(&config.assets_dir),
        show(&config.schema_file)
    );
}

/// Log where the event log was resolved to
pub fn log_log_path(path: &Path, source: &str) {
    info!("Using event log {} ({source})", path.display());
}

/// Log the outcome of reading the event log
pub fn log_read_summary(log: &EventLog) {
    info!(
        "Loaded {} event(s), skipped {} malformed line(s)",
        log.events.len(),
        log.skipped_count()
    );
    for skipped in &log.skipped {
        log_skipped_line(skipped);
    }
}

/// Log a single malformed line for debugging
pub fn log_skipped_line(skipped: &SkippedLine) {
    debug!("  line {}: {}", skipped.line_number, skipped.reason);
}

/// Log export completion
pub fn log_export_complete(rows: usize, path: &Path) {
    info!("Exported {rows} mis-prediction row(s) to {}", path.display());
}

/// Log a file change made by install or uninstall
pub fn log_file_change(action: &str, path: &Path) {
    info!("{action}: {}", path.display());
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_logger_initialization_verbose() {
        // Logger can only be initialized once per process
        std::panic::catch_unwind(|| init_logger(true, false)).ok();
    }

    #[test]
    fn test_logger_initialization_quiet() {
        std::panic::catch_unwind(|| init_logger(false, true)).ok();
    }

    #[test]
    fn test_logger_initialization_conflicting() {
        // Quiet takes precedence
        std::panic::catch_unwind(|| init_logger(true, true)).ok();
    }

    #[test]
    fn test_log_config_info_with_defaults() {
        log_config_info(&Config::default());

        let config = Config {
            rime_dir: Some("/home/user/.config/rime".to_string()),
            report_path: Some("/tmp/report.csv".to_string()),
            ..Default::default()
        };
        log_config_info(&config);
    }

    #[test]
    fn test_log_read_summary_with_skipped_lines() {
        let log = EventLog {
            events: vec![],
            skipped: vec![
                SkippedLine {
                    line_number: 3,
                    reason: "expected value at line 1 column 1".to_string(),
                },
                SkippedLine {
                    line_number: 7,
                    reason: "missing field `event_type`".to_string(),
                },
            ],
        };
        log_read_summary(&log);
        log_read_summary(&EventLog::default());
    }

    #[test]
    fn test_log_paths() {
        let path = PathBuf::from("/home/user/.config/rime/input_habit_log_structured.jsonl");
        log_log_path(&path, "default");
        log_export_complete(0, &path);
        log_export_complete(42, Path::new("报告.csv"));
        log_file_change("Installed", &path);
    }

    #[test]
    fn test_log_error_with_and_without_source() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        log_error("Failed to write report", Some(&io_error));
        log_error("Something went wrong", None);
        log_warning("Warning with emojis: ⚠️ 🔥");
        log_warning("");
    }
}
