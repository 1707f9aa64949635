use clap::{CommandFactory, Parser};
use rimelog::analysis::{LogData, collect_misses, compute_accuracy, read_event_log};
use rimelog::config::{CliConfig, Config};
use rimelog::core::constants::output_formats;
use rimelog::core::{Event, Preset, Result, RimeLogError};
use rimelog::reporting::logging;
use rimelog::reporting::{default_report_path, write_miss_report};
use rimelog::rime::{
    ResolvedLogPath, RimeManager, RimePaths, resolve_log_path, resolve_user_dir,
};
use rimelog::ui::completion::print_completions;
use rimelog::ui::{Cli, Commands, cli_to_config, output, prompt};

fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    match run_rimelog_logic(&cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, RimeLogError::SchemaAnchorMissing(_)) {
                output::display_manual_schema_hint();
            }
            std::process::exit(1);
        }
    }
}

/// Handle completion commands and return exit code if a completion command was processed
pub fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Commands::CompletionGenerate { shell } => {
            let mut app = Cli::command();
            print_completions(shell, &mut app);
            Some(0)
        }
        _ => None,
    }
}

/// Dispatch the selected subcommand; extracted from main() for testing
pub fn run_rimelog_logic(cli: &Cli) -> Result<i32> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;

    logging::init_logger(config.verbose.unwrap_or(false), cli_config.quiet);
    logging::log_config_info(&config);

    match cli.command {
        Commands::Analyze { .. } => run_analyze(&config),
        Commands::ExportMisses { .. } => run_export_misses(&config),
        Commands::Status => run_status(&config),
        Commands::Install { preset, .. } => run_install(&config, preset),
        Commands::Uninstall { remove_config, yes } => run_uninstall(&config, remove_config, yes),
        Commands::CompletionGenerate { .. } => Ok(0),
    }
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

fn rime_paths(config: &Config) -> Option<RimePaths> {
    resolve_user_dir(config.rime_dir_path())
        .map(|dir| RimePaths::new(dir).with_schema_file(config.schema_file_name()))
}

fn rime_manager(config: &Config) -> Result<RimeManager> {
    RimeManager::for_user_dir(
        resolve_user_dir(config.rime_dir_path()),
        config.schema_file_name(),
    )
}

fn resolve_event_log(config: &Config) -> Result<ResolvedLogPath> {
    let log = resolve_log_path(config.log_path_buf(), rime_paths(config).as_ref())?;
    logging::log_log_path(&log.path, &log.source.to_string());
    Ok(log)
}

/// Read the resolved log; `None` when the file does not exist
/// Events of the resolved log, or `None` after reporting why there is no data
fn load_events(log: &ResolvedLogPath, format: &str) -> Result<Option<Vec<Event>>> {
    match read_event_log(&log.path) {
        LogData::Missing => {
            output::display_log_missing(&log.path, format)?;
            Ok(None)
        }
        LogData::Unreadable(reason) => {
            logging::log_warning(&format!(
                "Could not read event log {}: {reason}",
                log.path.display()
            ));
            output::display_log_unreadable(&log.path, &reason, format)?;
            Ok(None)
        }
        LogData::Loaded(event_log) => {
            logging::log_read_summary(&event_log);
            output::display_skipped_lines(event_log.skipped_count());
            Ok(Some(event_log.events))
        }
    }
}

fn run_analyze(config: &Config) -> Result<i32> {
    let format = config.output_format();
    let log = resolve_event_log(config)?;
    if format == output_formats::TEXT {
        output::display_reading(&log);
    }

    let Some(events) = load_events(&log, format)? else {
        return Ok(0);
    };

    output::display_accuracy(&compute_accuracy(&events), format)?;
    Ok(0)
}

fn run_export_misses(config: &Config) -> Result<i32> {
    output::print_section("Export Mispredictions");
    let log = resolve_event_log(config)?;
    output::display_reading(&log);

    let Some(events) = load_events(&log, output_formats::TEXT)? else {
        return Ok(0);
    };

    let total_commits = events.iter().filter(|event| event.is_commit()).count();
    if total_commits == 0 {
        output::print_warning("No committed events found in the log.");
        return Ok(0);
    }

    let rows = collect_misses(&events);
    if rows.is_empty() {
        output::display_no_misses();
        return Ok(0);
    }

    let path = match config.report_path_buf() {
        Some(path) => path,
        None => default_report_path()?,
    };
    output::print_info(&format!("Writing report to {}", path.display()));

    let summary = write_miss_report(&rows, &path).inspect_err(|e| {
        logging::log_error("Export failed", Some(e));
    })?;
    logging::log_export_complete(summary.rows_written, &summary.path);
    output::display_export(&summary, total_commits);
    Ok(0)
}

fn run_status(config: &Config) -> Result<i32> {
    let manager = rime_manager(config)?;
    let status = manager.status();
    let log = resolve_log_path(config.log_path_buf(), Some(manager.paths()))?;

    output::display_status(&status, &log);
    Ok(0)
}

fn run_install(config: &Config, preset: Option<Preset>) -> Result<i32> {
    let manager = rime_manager(config)?;
    let preset = match preset {
        Some(preset) => preset,
        None => prompt::select_preset()?,
    };

    let outcome = manager.install(&config.assets_dir_path(), preset)?;
    output::display_install(&outcome, manager.paths());
    Ok(0)
}

fn run_uninstall(config: &Config, remove_config: bool, yes: bool) -> Result<i32> {
    let manager = rime_manager(config)?;
    let config_script = manager.paths().config_script();

    let remove_config = if remove_config {
        true
    } else if yes || !config_script.is_file() {
        false
    } else {
        prompt::confirm_remove_config(&config_script)?
    };

    let outcome = manager.uninstall(remove_config)?;
    output::display_uninstall(&outcome, manager.paths());
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("rimelog").chain(args.iter().copied()))
            .unwrap_or_else(|e| panic!("failed to parse {args:?}: {e}"))
    }

    #[test]
    fn test_handle_completion_commands_none() {
        let cli = parse(&["status"]);
        assert_eq!(handle_completion_commands(&cli), None);
    }

    #[test]
    fn test_load_and_merge_config_no_config_flag() -> Result<()> {
        let cli_config = CliConfig {
            no_config: true,
            ..Default::default()
        };
        let config = load_and_merge_config(&cli_config)?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_load_and_merge_config_with_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("rimelog.toml");
        fs::write(
            &config_path,
            "log_path = \"/from/file.jsonl\"\noutput_format = \"json\"\n",
        )?;

        let cli_config = CliConfig {
            config_file: Some(config_path.display().to_string()),
            log_path: Some("/from/cli.jsonl".to_string()),
            ..Default::default()
        };

        let config = load_and_merge_config(&cli_config)?;
        assert_eq!(config.log_path.as_deref(), Some("/from/cli.jsonl"));
        assert_eq!(config.output_format(), "json");
        Ok(())
    }

    #[test]
    fn test_load_and_merge_config_invalid_file() {
        let cli_config = CliConfig {
            config_file: Some("/nonexistent/config.toml".to_string()),
            ..Default::default()
        };
        assert!(load_and_merge_config(&cli_config).is_err());
    }

    #[test]
    fn test_load_events_missing_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let log = ResolvedLogPath {
            path: temp_dir.path().join("absent.jsonl"),
            source: rimelog::rime::LogPathSource::Explicit,
        };
        assert_eq!(load_events(&log, output_formats::TEXT)?, None);
        Ok(())
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_load_events_unreadable_file_is_no_data() -> Result<()> {
        let log = ResolvedLogPath {
            path: std::path::PathBuf::from("/proc/self/mem"),
            source: rimelog::rime::LogPathSource::Explicit,
        };
        if !log.path.is_file() {
            return Ok(());
        }
        assert_eq!(load_events(&log, output_formats::JSON)?, None);
        Ok(())
    }
}
