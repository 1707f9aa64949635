//! Log analysis
//!
//! This module reads the structured input habit log and derives the
//! accuracy metrics and mis-prediction rows from it.

pub mod metrics;
pub mod misses;
pub mod reader;

// Re-export commonly used items
pub use metrics::{AccuracyMetrics, AccuracyReport, SelectionMetrics, compute_accuracy};
pub use misses::{MissRow, collect_misses};
pub use reader::{EventLog, LogData, SkippedLine, read_event_log};
