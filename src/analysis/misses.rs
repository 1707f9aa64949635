//! Mis-prediction rows: commits where a non-top candidate was chosen.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::cmp::Ordering;

use crate::core::types::Event;

/// One miss, projected for the exported report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissRow {
    pub user_input: Option<String>,
    pub selected_text: Option<String>,
    pub predicted_text: Option<String>,
    pub selected_rank: i64,
    /// Number of misses sharing this row's `selected_text`, itself included
    pub miss_frequency: usize,
}

impl MissRow {
    fn from_event(event: &Event, rank: i64) -> Self {
        Self {
            user_input: event.source_input_buffer.clone(),
            selected_text: event.committed_text.clone(),
            predicted_text: event.source_first_candidate.clone(),
            selected_rank: rank,
            miss_frequency: 0,
        }
    }
}

/// Build the sorted mis-prediction rows.
///
/// Rows are ordered by `miss_frequency` descending, then by user input in
/// code-point order. Rows without user input come after those with one;
/// complete ties keep log order.
pub fn collect_misses(events: &[Event]) -> Vec<MissRow> {
    let mut rows: Vec<MissRow> = events
        .iter()
        .filter(|e| e.is_miss())
        .filter_map(|e| e.selected_candidate_rank.map(|rank| MissRow::from_event(e, rank)))
        .collect();

    let mut frequencies: FxHashMap<Option<String>, usize> = FxHashMap::default();
    for row in &rows {
        *frequencies.entry(row.selected_text.clone()).or_insert(0) += 1;
    }
    for row in &mut rows {
        row.miss_frequency = frequencies.get(&row.selected_text).copied().unwrap_or(0);
    }

    rows.sort_by(compare_rows);
    rows
}

fn compare_rows(a: &MissRow, b: &MissRow) -> Ordering {
    b.miss_frequency
        .cmp(&a.miss_frequency)
        .then_with(|| compare_absent_last(&a.user_input, &b.user_input))
}

fn compare_absent_last(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
