// Command-line interface definitions and parsing for rimelog

use crate::config::CliConfig;
use crate::core::constants::output_formats;
use crate::core::types::Preset;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    // Locations
    /// Rime user directory (default: detected)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Locations")]
    pub rime_dir: Option<String>,

    /// Event log to analyze (default: resolved from the logger config)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Locations")]
    pub log: Option<String>,

    // Output & Verbosity
    /// Suppress log output
    #[arg(short = 'q', long, global = true, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, global = true, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, global = true, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print accuracy metrics for the event log
    Analyze {
        /// Output format (default: text)
        #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL)]
        format: Option<String>,
    },
    /// Export mis-predicted commits to a CSV report
    #[command(name = "export-misses")]
    ExportMisses {
        /// Report destination (default: ~/rime_mispredictions_report.csv)
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<String>,
    },
    /// Show what is installed in the Rime user directory
    Status,
    /// Install the logger scripts and register the processor in the schema
    Install {
        /// Directory containing the Lua scripts (default: ./assets)
        #[arg(long, value_name = "DIR")]
        assets: Option<String>,

        /// Logging preset (prompted when omitted)
        #[arg(long, value_enum)]
        preset: Option<Preset>,
    },
    /// Remove the logger and unregister it from the schema
    Uninstall {
        /// Also remove the logger config script
        #[arg(long)]
        remove_config: bool,

        /// Do not prompt; keep the config script unless --remove-config is given
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    let mut cli_config = CliConfig {
        rime_dir: cli.rime_dir.clone(),
        log_path: cli.log.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
        ..Default::default()
    };

    match cli.command {
        Commands::Analyze { ref format } => {
            cli_config.output_format = format.clone();
        }
        Commands::ExportMisses { ref output } => {
            cli_config.report_path = output.clone();
        }
        Commands::Install { ref assets, .. } => {
            cli_config.assets_dir = assets.clone();
        }
        Commands::Status | Commands::Uninstall { .. } | Commands::CompletionGenerate { .. } => {}
    }

    cli_config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("rimelog").chain(args.iter().copied()))
            .unwrap_or_else(|e| panic!("failed to parse {args:?}: {e}"))
    }

    #[test]
    fn test_cli_to_config_default() {
        let cli = parse(&["status"]);

        let config = cli_to_config(&cli);

        assert_eq!(config.rime_dir, None);
        assert_eq!(config.log_path, None);
        assert_eq!(config.report_path, None);
        assert_eq!(config.assets_dir, None);
        assert_eq!(config.output_format, None);
        assert!(!config.quiet);
        assert!(!config.verbose);
        assert_eq!(config.config_file, None);
        assert!(!config.no_config);
    }

    #[test]
    fn test_cli_to_config_global_options() {
        let cli = parse(&[
            "analyze",
            "--format",
            "json",
            "--log",
            "/tmp/habit.jsonl",
            "--rime-dir",
            "/rime",
            "--config",
            "custom.toml",
            "-v",
        ]);

        let config = cli_to_config(&cli);

        assert_eq!(config.output_format.as_deref(), Some("json"));
        assert_eq!(config.log_path.as_deref(), Some("/tmp/habit.jsonl"));
        assert_eq!(config.rime_dir.as_deref(), Some("/rime"));
        assert_eq!(config.config_file.as_deref(), Some("custom.toml"));
        assert!(config.verbose);
    }

    #[test]
    fn test_cli_to_config_export_output() {
        let cli = parse(&["export-misses", "-o", "/tmp/misses.csv"]);
        let config = cli_to_config(&cli);
        assert_eq!(config.report_path.as_deref(), Some("/tmp/misses.csv"));
    }

    #[test]
    fn test_cli_install_options() {
        let cli = parse(&["install", "--assets", "scripts", "--preset", "developer"]);

        match cli.command {
            Commands::Install { ref preset, .. } => assert_eq!(*preset, Some(Preset::Developer)),
            _ => panic!("Expected install command"),
        }
        assert_eq!(cli_to_config(&cli).assets_dir.as_deref(), Some("scripts"));
    }

    #[test]
    fn test_cli_uninstall_flags() {
        let cli = parse(&["uninstall", "--remove-config", "-y"]);
        match cli.command {
            Commands::Uninstall { remove_config, yes } => {
                assert!(remove_config);
                assert!(yes);
            }
            _ => panic!("Expected uninstall command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let result = Cli::try_parse_from(["rimelog", "analyze", "--format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["rimelog"]).is_err());
    }
}
