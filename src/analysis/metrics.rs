//! Prediction accuracy metrics over the committed events of a log.

use serde::{Serialize, Serializer};

use crate::core::constants::events;
use crate::core::types::Event;

/// Reciprocal-rank score of one candidate selection.
///
/// Rank 0 scores 1.0, rank 1 scores 0.5, rank 2 scores 1/3.
pub fn accuracy_score(rank: i64) -> f64 {
    1.0 / (rank as f64 + 1.0)
}

/// Statistics over candidate selections (`rank >= 0`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionMetrics {
    pub total_selections: usize,
    pub first_choice_count: usize,
    pub top3_count: usize,
    pub first_choice_rate: f64,
    pub top3_rate: f64,
    pub mean_rank: f64,
    pub overall_score: f64,
}

/// Accuracy metrics of a log with at least one committed event.
///
/// Serializes flat: every metric is a top-level key and selection metrics
/// are `null` when no commit selected a candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyMetrics {
    pub total_commits: usize,
    pub raw_input_commits: usize,
    /// Commits carrying no rank at all
    pub unranked_commits: usize,
    pub raw_input_rate: Option<f64>,
    /// `None` when no commit selected a candidate
    pub selections: Option<SelectionMetrics>,
}

impl AccuracyMetrics {
    pub fn total_selections(&self) -> Option<usize> {
        self.selections.as_ref().map(|s| s.total_selections)
    }

    pub fn first_choice_rate(&self) -> Option<f64> {
        self.selections.as_ref().map(|s| s.first_choice_rate)
    }

    pub fn top3_rate(&self) -> Option<f64> {
        self.selections.as_ref().map(|s| s.top3_rate)
    }

    pub fn mean_rank(&self) -> Option<f64> {
        self.selections.as_ref().map(|s| s.mean_rank)
    }

    pub fn overall_score(&self) -> Option<f64> {
        self.selections.as_ref().map(|s| s.overall_score)
    }
}

#[derive(Serialize)]
struct FlatMetrics {
    total_selections: Option<usize>,
    first_choice_count: Option<usize>,
    top3_count: Option<usize>,
    first_choice_rate: Option<f64>,
    top3_rate: Option<f64>,
    mean_rank: Option<f64>,
    overall_score: Option<f64>,
    total_commits: usize,
    raw_input_commits: usize,
    unranked_commits: usize,
    raw_input_rate: Option<f64>,
}

impl From<&AccuracyMetrics> for FlatMetrics {
    fn from(metrics: &AccuracyMetrics) -> Self {
        let selections = metrics.selections.as_ref();
        Self {
            total_selections: metrics.total_selections(),
            first_choice_count: selections.map(|s| s.first_choice_count),
            top3_count: selections.map(|s| s.top3_count),
            first_choice_rate: metrics.first_choice_rate(),
            top3_rate: metrics.top3_rate(),
            mean_rank: metrics.mean_rank(),
            overall_score: metrics.overall_score(),
            total_commits: metrics.total_commits,
            raw_input_commits: metrics.raw_input_commits,
            unranked_commits: metrics.unranked_commits,
            raw_input_rate: metrics.raw_input_rate,
        }
    }
}

impl Serialize for AccuracyMetrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FlatMetrics::from(self).serialize(serializer)
    }
}

/// Outcome of the accuracy analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AccuracyReport {
    NoCommittedEvents,
    Computed(AccuracyMetrics),
}

impl AccuracyReport {
    pub fn metrics(&self) -> Option<&AccuracyMetrics> {
        match self {
            AccuracyReport::NoCommittedEvents => None,
            AccuracyReport::Computed(metrics) => Some(metrics),
        }
    }
}

/// Compute accuracy metrics over the `text_committed` events.
pub fn compute_accuracy(events: &[Event]) -> AccuracyReport {
    let commits: Vec<&Event> = events.iter().filter(|e| e.is_commit()).collect();
    if commits.is_empty() {
        return AccuracyReport::NoCommittedEvents;
    }

    let total_commits = commits.len();
    let raw_input_commits = commits.iter().filter(|e| e.is_raw_input()).count();
    let unranked_commits = commits
        .iter()
        .filter(|e| e.selected_candidate_rank.is_none())
        .count();

    let ranks: Vec<i64> = commits.iter().filter_map(|e| e.selection_rank()).collect();

    AccuracyReport::Computed(AccuracyMetrics {
        total_commits,
        raw_input_commits,
        unranked_commits,
        raw_input_rate: Some(raw_input_commits as f64 / total_commits as f64),
        selections: selection_metrics(&ranks),
    })
}

fn selection_metrics(ranks: &[i64]) -> Option<SelectionMetrics> {
    if ranks.is_empty() {
        return None;
    }

    let total = ranks.len() as f64;
    let first_choice_count = ranks.iter().filter(|&&rank| rank == 0).count();
    let top3_count = ranks.iter().filter(|&&rank| rank < events::TOP_N).count();
    let rank_sum: f64 = ranks.iter().map(|&rank| rank as f64).sum();
    let score_sum: f64 = ranks.iter().map(|&rank| accuracy_score(rank)).sum();

    Some(SelectionMetrics {
        total_selections: ranks.len(),
        first_choice_count,
        top3_count,
        first_choice_rate: first_choice_count as f64 / total,
        top3_rate: top3_count as f64 / total,
        mean_rank: rank_sum / total,
        overall_score: score_sum / total,
    })
}
