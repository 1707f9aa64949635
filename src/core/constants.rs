/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes file names, schema snippets, event tags and other
/// literal values shared by the analysis, reporting and Rime integration code.
/// Output format constants
pub mod output_formats {
    /// Text output format - colorful, human readable sections
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 2] = [TEXT, JSON];
}

/// File names inside the Rime user directory and elsewhere
pub mod files {
    /// Logger processor script installed into `lua/`
    pub const LOGGER_SCRIPT: &str = "input_habit_logger.lua";
    /// Logger configuration script installed into `lua/`
    pub const CONFIG_SCRIPT: &str = "input_habit_logger_config.lua";
    /// Subdirectory of the Rime user directory holding Lua scripts
    pub const LUA_DIR: &str = "lua";
    /// Schema file patched to register the logger processor
    pub const SCHEMA_FILE: &str = "wanxiang.schema.yaml";
    /// Log file written by the logger when no preset overrides it
    pub const DEFAULT_LOG_FILE: &str = "input_habit_log_structured.jsonl";
    /// Mis-prediction report written into the home directory
    pub const REPORT_FILE: &str = "rime_mispredictions_report.csv";
    /// Configuration file searched in the current and parent directories
    pub const CONFIG_FILE: &str = ".rimelog.toml";
    /// Default directory holding the Lua assets for `install`
    pub const DEFAULT_ASSETS_DIR: &str = "assets";
    /// Number of parent directories searched for the configuration file
    pub const CONFIG_SEARCH_DEPTH: usize = 3;
}

/// Event log vocabulary
pub mod events {
    /// The only event type consumed by analytics
    pub const TEXT_COMMITTED: &str = "text_committed";
    /// Rank recorded when text was committed without a candidate
    pub const RAW_INPUT_RANK: i64 = -1;
    /// Ranks strictly below this count as a top-N hit
    pub const TOP_N: i64 = 3;
}

/// Schema patching constants
pub mod schema {
    /// Processor entry registering the logger in `engine/processors`
    pub const PROCESSOR_LINE: &str =
        "      - lua_processor@*input_habit_logger #输入习惯记录器 - 记录用户输入习惯";
    /// Processor name the logger entry is inserted after
    pub const ANCHOR: &str = "punctuator";
    /// Suffix of the backup written before installing
    pub const INSTALL_BACKUP_SUFFIX: &str = ".bak";
    /// Suffix of the backup written before uninstalling
    pub const UNINSTALL_BACKUP_SUFFIX: &str = ".uninstall.bak";
}

/// Mis-prediction report layout
pub mod report {
    /// UTF-8 byte-order mark so spreadsheet tools detect the encoding
    pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
    /// Header row of the exported CSV
    pub const HEADERS: [&str; 5] = [
        "User_Input",
        "Selected_Text",
        "Predicted_Text",
        "Selected_Rank",
        "miss_frequency",
    ];
    /// Suffix of the temporary file written before the final rename
    pub const PARTIAL_SUFFIX: &str = ".partial";
}

/// Display and formatting constants
pub mod display {
    /// Emoji for success status
    pub const SUCCESS_EMOJI: &str = "✅";
    /// Emoji for warning status
    pub const WARNING_EMOJI: &str = "⚠️";
    /// Emoji for error status
    pub const ERROR_EMOJI: &str = "❌";
    /// Emoji for unknown status
    pub const UNKNOWN_EMOJI: &str = "❓";
    /// Emoji for file information
    pub const FILE_EMOJI: &str = "📁";
    /// Emoji for exported reports
    pub const REPORT_EMOJI: &str = "📊";
}
