//! Reporting
//!
//! This module handles exporting the mis-prediction report and
//! structured logging for the application.

pub mod export;
pub mod logging;

// Re-export commonly used items
pub use export::{ExportSummary, default_report_path, write_miss_report};
