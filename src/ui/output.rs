//! Output formatting and display logic for rimelog

use std::fmt::Write as _;
use std::path::Path;

use crate::analysis::{AccuracyMetrics, AccuracyReport};
use crate::core::constants::{display, output_formats, schema};
use crate::core::error::Result;
use crate::reporting::ExportSummary;
use crate::rime::{
    ConfigScriptChange, InstallOutcome, ResolvedLogPath, RimePaths, SchemaChange, SchemaState,
    StatusReport, UninstallOutcome,
};
use crate::ui::color::{Colors, colorize, heading, rate_color};

/// Print a top-level section title
pub fn print_section(title: &str) {
    println!("{}", heading(title));
    println!("{}", "=".repeat(title.chars().count()));
}

pub fn print_info(message: &str) {
    println!("{message}");
}

pub fn print_success(message: &str) {
    println!(
        "{} {}",
        display::SUCCESS_EMOJI,
        colorize(message, Colors::GREEN)
    );
}

pub fn print_warning(message: &str) {
    println!(
        "{} {}",
        display::WARNING_EMOJI,
        colorize(message, Colors::YELLOW)
    );
}

fn percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

fn key_value(out: &mut String, key: &str, value: &str) {
    let _ = writeln!(out, "  {}: {}", colorize(key, Colors::CYAN), value);
}

fn subsection(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", colorize(title, Colors::BOLD));
}

/// Human-readable rendering of an accuracy report
pub fn format_accuracy_text(report: &AccuracyReport) -> String {
    let mut out = String::new();

    let metrics = match report {
        AccuracyReport::NoCommittedEvents => {
            let _ = writeln!(
                out,
                "{} No committed events found in the log.",
                display::WARNING_EMOJI
            );
            return out;
        }
        AccuracyReport::Computed(metrics) => metrics,
    };

    subsection(&mut out, "Prediction accuracy");
    match metrics.selections {
        Some(ref s) => {
            key_value(
                &mut out,
                "Total candidate selections",
                &s.total_selections.to_string(),
            );
            key_value(
                &mut out,
                "First-choice hit rate",
                &colorize(&percent(s.first_choice_rate), rate_color(s.first_choice_rate)),
            );
            key_value(
                &mut out,
                "Top-3 hit rate",
                &colorize(&percent(s.top3_rate), rate_color(s.top3_rate)),
            );
            key_value(&mut out, "Mean selected rank", &format!("{:.2}", s.mean_rank));
            key_value(
                &mut out,
                "Overall prediction score",
                &format!("{:.3} / 1.000", s.overall_score),
            );
        }
        None => {
            let _ = writeln!(
                out,
                "  {} No valid candidate selections found.",
                display::WARNING_EMOJI
            );
        }
    }

    format_general_statistics(&mut out, metrics);
    out
}

fn format_general_statistics(out: &mut String, metrics: &AccuracyMetrics) {
    subsection(out, "General statistics");
    key_value(
        out,
        "Total commits (including raw input)",
        &metrics.total_commits.to_string(),
    );
    if let Some(rate) = metrics.raw_input_rate {
        key_value(out, "Raw input rate", &percent(rate));
    }
    if metrics.unranked_commits > 0 {
        key_value(
            out,
            "Commits without a rank",
            &colorize(&metrics.unranked_commits.to_string(), Colors::DIM),
        );
    }
}

/// Print an accuracy report in the requested format
pub fn display_accuracy(report: &AccuracyReport, format: &str) -> Result<()> {
    match format {
        output_formats::JSON => println!("{}", serde_json::to_string_pretty(report)?),
        _ => {
            print_section("Input Habit Analysis");
            print!("{}", format_accuracy_text(report));
        }
    }
    Ok(())
}

/// Report a log file that does not exist
pub fn display_log_missing(path: &Path, format: &str) -> Result<()> {
    match format {
        output_formats::JSON => {
            let value = serde_json::json!({
                "status": "log_not_found",
                "log_path": path.display().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        _ => {
            println!(
                "{} Log file not found: {}",
                display::ERROR_EMOJI,
                path.display()
            );
            println!("Make sure the logger is installed and Rime has been used since.");
        }
    }
    Ok(())
}

/// Report a log file that exists but could not be read
pub fn display_log_unreadable(path: &Path, reason: &str, format: &str) -> Result<()> {
    match format {
        output_formats::JSON => {
            let value = serde_json::json!({
                "status": "log_unreadable",
                "log_path": path.display().to_string(),
                "reason": reason,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        _ => {
            println!(
                "{} Log file could not be read: {} ({reason})",
                display::WARNING_EMOJI,
                path.display()
            );
            println!("No data to analyze.");
        }
    }
    Ok(())
}

/// Warn on stderr about malformed lines skipped while reading
pub fn display_skipped_lines(count: usize) {
    if count > 0 {
        eprintln!(
            "{} Skipped {count} malformed line(s) in the log (run with --verbose for details)",
            display::WARNING_EMOJI
        );
    }
}

pub fn display_reading(log: &ResolvedLogPath) {
    println!(
        "{} Reading log file: {} ({})",
        display::FILE_EMOJI,
        log.path.display(),
        log.source
    );
}

pub fn display_no_misses() {
    print_success("No mispredictions found. Every selection was the first candidate.");
}

pub fn display_export(summary: &ExportSummary, total_commits: usize) {
    println!(
        "{} Found {} misprediction(s) in {} commit(s)",
        display::REPORT_EMOJI,
        summary.rows_written,
        total_commits
    );
    print_success(&format!(
        "Exported {} row(s) to '{}'",
        summary.rows_written,
        summary.path.display()
    ));
    println!("The most frequent misses are listed first.");
}

fn status_line(ok: bool, message: &str) {
    let emoji = if ok {
        display::SUCCESS_EMOJI
    } else {
        display::ERROR_EMOJI
    };
    println!("{emoji} {message}");
}

/// Print the installation snapshot and the resolved log file
pub fn display_status(status: &StatusReport, log: &ResolvedLogPath) {
    print_section("Rime Logger Status");
    status_line(
        true,
        &format!("Rime user directory: {}", status.user_dir.display()),
    );

    if status.logger_installed {
        status_line(
            true,
            &format!("Logger script: {}", status.logger_script.display()),
        );
    } else {
        status_line(false, "Logger script not found");
    }

    if status.config_installed {
        let preset = status.active_preset.as_deref().unwrap_or("unknown");
        status_line(
            true,
            &format!(
                "Config script: {} (preset: {preset})",
                status.config_script.display()
            ),
        );
    } else {
        status_line(false, "Config script not found");
    }

    match status.schema {
        SchemaState::Missing => status_line(
            false,
            &format!("Schema file not found: {}", status.schema_file.display()),
        ),
        SchemaState::Configured => status_line(
            true,
            &format!("Schema '{}' is configured for the logger", file_name(&status.schema_file)),
        ),
        SchemaState::NotConfigured => status_line(
            false,
            &format!("Schema '{}' is not configured", file_name(&status.schema_file)),
        ),
        SchemaState::Unreadable(ref reason) => println!(
            "{} Could not read schema file: {reason}",
            display::UNKNOWN_EMOJI
        ),
    }

    if log.path.is_file() {
        status_line(
            true,
            &format!("Log file: {} ({})", log.path.display(), log.source),
        );
    } else {
        println!(
            "{} Log file not created yet: {} ({})",
            display::WARNING_EMOJI,
            log.path.display(),
            log.source
        );
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Guidance shown when the `custom` preset is chosen
pub fn display_custom_guidance(paths: &RimePaths) {
    println!("Custom preset selected. Nothing was installed.");
    println!(
        "Edit {} by hand, set preset_choice to your own preset, then run install again.",
        paths.config_script().display()
    );
}

pub fn display_install(outcome: &InstallOutcome, paths: &RimePaths) {
    let InstallOutcome::Installed {
        preset,
        ref config_script,
        ref schema,
    } = *outcome
    else {
        display_custom_guidance(paths);
        return;
    };

    print_section("Logger Installation");
    println!("Rime user directory: {}", paths.user_dir().display());
    println!("  [+] Installed: {}", paths.logger_script().display());
    match config_script {
        ConfigScriptChange::Copied => {
            println!("  [+] Installed: {}", paths.config_script().display())
        }
        ConfigScriptChange::PresetUpdated => println!(
            "  [*] Config script kept, preset switched to '{preset}': {}",
            paths.config_script().display()
        ),
        ConfigScriptChange::PresetLineMissing => print_warning(&format!(
            "Config script kept, but it has no preset_choice line: {}",
            paths.config_script().display()
        )),
    }
    match schema {
        SchemaChange::Updated { backup } => {
            println!("  [*] Backed up schema to: {}", backup.display());
            println!("  [+] Configured '{}'", paths.schema_name());
        }
        SchemaChange::Unchanged | SchemaChange::Missing => {
            println!("  [*] Schema already configured. No changes needed.")
        }
    }
    print_success("Installation successful!");
    display_redeploy_reminder();
}

pub fn display_uninstall(outcome: &UninstallOutcome, paths: &RimePaths) {
    print_section("Logger Uninstallation");
    if outcome.logger_removed {
        println!("  [-] Removed: {}", paths.logger_script().display());
    } else {
        println!("  [*] Logger script not found, skipping.");
    }
    if outcome.config_removed {
        println!("  [-] Removed: {}", paths.config_script().display());
    } else if paths.config_script().is_file() {
        println!("  [*] Kept config script: {}", paths.config_script().display());
    }
    match outcome.schema {
        SchemaChange::Updated { ref backup } => {
            println!("  [*] Backed up schema to: {}", backup.display());
            println!("  [+] Removed logger from '{}'", paths.schema_name());
        }
        SchemaChange::Unchanged => {
            println!("  [*] Logger not registered in schema. No changes needed.")
        }
        SchemaChange::Missing => println!("  [*] Schema file not found, skipping."),
    }
    print_success("Uninstallation successful!");
    display_redeploy_reminder();
}

/// Manual fix for a schema without a punctuator entry
pub fn display_manual_schema_hint() {
    eprintln!("Add the following line manually under `engine/processors`:");
    eprintln!("{}", schema::PROCESSOR_LINE.trim());
}

pub fn display_redeploy_reminder() {
    println!(
        "\n{}",
        colorize(
            "IMPORTANT: Re-deploy Rime now for the changes to take effect.",
            Colors::BRIGHT_WHITE
        )
    );
}
