//! Rime integration
//!
//! Locating the Rime user directory, resolving the event log path from the
//! logger's Lua configuration, and installing the logger into a schema.

pub mod config_script;
pub mod directory;
pub mod log_path;
pub mod manager;
pub mod schema;

// Re-export commonly used items
pub use directory::{RimePaths, detect_user_dir, resolve_user_dir};
pub use log_path::{LogPathSource, ResolvedLogPath, resolve_log_path};
pub use manager::{
    ConfigScriptChange, InstallOutcome, RimeManager, SchemaState, StatusReport, UninstallOutcome,
};
pub use schema::SchemaChange;
