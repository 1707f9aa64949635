use std::fmt;

/// Comprehensive error types for rimelog operations
#[derive(Debug)]
pub enum RimeLogError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// JSON serialization error
    Json(serde_json::Error),

    /// CSV writing error
    Csv(csv::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Regex compilation error
    Regex(regex::Error),

    /// Interactive prompt error
    Prompt(dialoguer::Error),

    /// Rime user directory could not be detected
    RimeDirNotFound(String),

    /// File not found error
    FileNotFound(String),

    /// Schema has no entry to anchor the logger processor to
    SchemaAnchorMissing(String),

    /// Invalid argument error
    InvalidArgument(String),

    /// Writing the report to `destination` failed
    Export {
        destination: String,
        temporary: String,
        source: Box<RimeLogError>,
    },
}

impl fmt::Display for RimeLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RimeLogError::Io(err) => write!(f, "IO error: {err}"),
            RimeLogError::Config(msg) => write!(f, "Configuration error: {msg}"),
            RimeLogError::Json(err) => write!(f, "JSON error: {err}"),
            RimeLogError::Csv(err) => write!(f, "CSV error: {err}"),
            RimeLogError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            RimeLogError::Regex(err) => write!(f, "Regex error: {err}"),
            RimeLogError::Prompt(err) => write!(f, "Prompt error: {err}"),
            RimeLogError::RimeDirNotFound(msg) => {
                write!(f, "Rime user directory not found: {msg}")
            }
            RimeLogError::FileNotFound(path) => write!(f, "File not found: {path}"),
            RimeLogError::SchemaAnchorMissing(path) => write!(
                f,
                "Schema error: could not find a 'punctuator' entry in {path}"
            ),
            RimeLogError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            RimeLogError::Export {
                destination,
                temporary,
                source,
            } => write!(
                f,
                "Export error: could not write {destination} (temporary file {temporary}): {source}"
            ),
        }
    }
}

impl std::error::Error for RimeLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RimeLogError::Io(err) => Some(err),
            RimeLogError::Json(err) => Some(err),
            RimeLogError::Csv(err) => Some(err),
            RimeLogError::TomlParsing(err) => Some(err),
            RimeLogError::Regex(err) => Some(err),
            RimeLogError::Prompt(err) => Some(err),
            RimeLogError::Export { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RimeLogError {
    fn from(err: std::io::Error) -> Self {
        RimeLogError::Io(err)
    }
}

impl From<serde_json::Error> for RimeLogError {
    fn from(err: serde_json::Error) -> Self {
        RimeLogError::Json(err)
    }
}

impl From<csv::Error> for RimeLogError {
    fn from(err: csv::Error) -> Self {
        RimeLogError::Csv(err)
    }
}

impl From<toml::de::Error> for RimeLogError {
    fn from(err: toml::de::Error) -> Self {
        RimeLogError::TomlParsing(err)
    }
}

impl From<regex::Error> for RimeLogError {
    fn from(err: regex::Error) -> Self {
        RimeLogError::Regex(err)
    }
}

impl From<dialoguer::Error> for RimeLogError {
    fn from(err: dialoguer::Error) -> Self {
        RimeLogError::Prompt(err)
    }
}

/// Type alias for Results using RimeLogError
pub type Result<T> = std::result::Result<T, RimeLogError>;
