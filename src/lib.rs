//! rimelog: install the Rime input habit logger and analyze what it records.
//!
//! The analysis pipeline reads the structured event log
//! ([`analysis::read_event_log`]), computes prediction accuracy
//! ([`analysis::compute_accuracy`]) and collects mis-predictions
//! ([`analysis::collect_misses`]) that [`reporting::write_miss_report`]
//! exports as CSV.

pub mod analysis;
pub mod config;
pub mod core;
pub mod reporting;
pub mod rime;
pub mod ui;

// Re-export commonly used items
pub use analysis::{AccuracyReport, MissRow, collect_misses, compute_accuracy, read_event_log};
pub use config::{CliConfig, Config};
pub use crate::core::{Event, EventType, Preset, Result, RimeLogError};
