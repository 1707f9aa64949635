use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::constants::events;

/// Kind of a logged input action.
///
/// Only [`EventType::TextCommitted`] feeds the analytics; every other tag the
/// logger writes is preserved verbatim so it can still be reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    TextCommitted,
    Other(String),
}

impl From<String> for EventType {
    fn from(tag: String) -> Self {
        if tag == events::TEXT_COMMITTED {
            Self::TextCommitted
        } else {
            Self::Other(tag)
        }
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::TextCommitted => events::TEXT_COMMITTED.to_string(),
            EventType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TextCommitted => f.write_str(events::TEXT_COMMITTED),
            Self::Other(tag) => f.write_str(tag),
        }
    }
}

/// One record of the structured input habit log.
///
/// `event_type` is the only mandatory field. Everything else is optional and
/// stays `None` when the logger did not write it, so absent values are never
/// confused with empty strings or rank zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Tag of the logged action
    pub event_type: EventType,

    /// `-1` for raw input, `0` for the top candidate, `k > 0` for a miss
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_candidate_rank: Option<i64>,

    /// Raw input sequence that produced the commit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_input_buffer: Option<String>,

    /// Text actually inserted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committed_text: Option<String>,

    /// Top-ranked candidate at commit time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_first_candidate: Option<String>,
}

impl Event {
    /// Create a `text_committed` event with the given rank and no text fields.
    ///
    /// # Examples
    /// ```
    /// use rimelog::core::types::Event;
    ///
    /// let event = Event::committed(2).with_committed_text("的");
    /// assert!(event.is_commit());
    /// assert!(event.is_miss());
    /// ```
    pub fn committed(rank: i64) -> Self {
        Self {
            event_type: EventType::TextCommitted,
            selected_candidate_rank: Some(rank),
            source_input_buffer: None,
            committed_text: None,
            source_first_candidate: None,
        }
    }

    /// Create an event of an arbitrary type with no optional fields.
    pub fn of_type(tag: impl Into<String>) -> Self {
        Self {
            event_type: EventType::from(tag.into()),
            selected_candidate_rank: None,
            source_input_buffer: None,
            committed_text: None,
            source_first_candidate: None,
        }
    }

    pub fn with_rank(mut self, rank: i64) -> Self {
        self.selected_candidate_rank = Some(rank);
        self
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.source_input_buffer = Some(input.into());
        self
    }

    pub fn with_committed_text(mut self, text: impl Into<String>) -> Self {
        self.committed_text = Some(text.into());
        self
    }

    pub fn with_first_candidate(mut self, text: impl Into<String>) -> Self {
        self.source_first_candidate = Some(text.into());
        self
    }

    /// Whether this event belongs to the commit set
    pub fn is_commit(&self) -> bool {
        self.event_type == EventType::TextCommitted
    }

    /// Rank of a committed candidate selection (`rank >= 0`), if any
    pub fn selection_rank(&self) -> Option<i64> {
        if !self.is_commit() {
            return None;
        }
        self.selected_candidate_rank.filter(|rank| *rank >= 0)
    }

    /// Whether this is a commit of raw text with no candidate involved
    pub fn is_raw_input(&self) -> bool {
        self.is_commit() && self.selected_candidate_rank == Some(events::RAW_INPUT_RANK)
    }

    /// Whether a non-top candidate was committed
    pub fn is_miss(&self) -> bool {
        self.is_commit() && self.selected_candidate_rank.is_some_and(|rank| rank > 0)
    }
}

/// Logging profile selected in the Lua configuration script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// Recommended; enough data to compute prediction accuracy
    Normal,
    /// For dictionary contributors; focuses on non-top commits
    Developer,
    /// Records nearly everything for deep analysis
    Advanced,
    /// Edit the configuration script by hand
    Custom,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Normal,
        Preset::Developer,
        Preset::Advanced,
        Preset::Custom,
    ];

    /// Name written into `local preset_choice = "..."`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Developer => "developer",
            Self::Advanced => "advanced",
            Self::Custom => "custom",
        }
    }

    /// Label shown by the interactive preset prompt
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal - recommended, measures prediction accuracy",
            Self::Developer => "Developer - for dictionary contributors, focuses on misses",
            Self::Advanced => "Advanced - records almost everything for deep analysis",
            Self::Custom => "Custom - edit the configuration script by hand",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
