//! Line-tolerant reader for the structured input habit log.
//!
//! Every line is parsed on its own. A malformed line is recorded as a
//! [`SkippedLine`] and reading continues with the next line.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::core::types::Event;

/// A log line that could not be turned into an [`Event`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-indexed line number in the log file
    pub line_number: usize,
    /// Parser message describing the defect
    pub reason: String,
}

/// Events loaded from one log file, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    pub events: Vec<Event>,
    pub skipped: Vec<SkippedLine>,
}

impl EventLog {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Result of reading a log path
#[derive(Debug, Clone, PartialEq)]
pub enum LogData {
    /// The path does not exist or is not a regular file
    Missing,
    /// The file exists but could not be opened or read; holds the OS message
    Unreadable(String),
    Loaded(EventLog),
}

impl LogData {
    /// Events to analyze; a missing or unreadable log behaves like an empty one
    pub fn events(&self) -> &[Event] {
        match self {
            LogData::Missing | LogData::Unreadable(_) => &[],
            LogData::Loaded(log) => &log.events,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, LogData::Missing)
    }

    /// Whether there is no data to analyze
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, LogData::Loaded(_))
    }
}

/// Read the event log at `path`.
///
/// Never fails: a path that does not exist is [`LogData::Missing`], a file
/// that cannot be opened or read is [`LogData::Unreadable`], and per-line
/// parse failures are recorded as skipped lines.
pub fn read_event_log<P: AsRef<Path>>(path: P) -> LogData {
    let path = path.as_ref();
    if !path.is_file() {
        return LogData::Missing;
    }

    let loaded = File::open(path).and_then(|file| parse_event_lines(BufReader::new(file)));
    match loaded {
        Ok(log) => LogData::Loaded(log),
        Err(err) => LogData::Unreadable(err.to_string()),
    }
}

/// Parse JSON lines from any buffered reader.
pub fn parse_event_lines<R: BufRead>(reader: R) -> io::Result<EventLog> {
    let mut log = EventLog::default();

    for (index, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let line_number = index + 1;

        let mut bytes = line.as_slice();
        if line_number == 1 {
            bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        }
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);

        if bytes.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        match serde_json::from_slice::<Event>(bytes) {
            Ok(event) => log.events.push(event),
            Err(err) => log.skipped.push(SkippedLine {
                line_number,
                reason: err.to_string(),
            }),
        }
    }

    Ok(log)
}
