//! Per-card view state, advanced by pure transitions.
//!
//! Each `HabitCard` instance owns one `CardState` snapshot (entries + stats
//! for its habit). Components never poke fields directly; they feed
//! `CardEvent`s through `reduce`, which keeps the loading/error lifecycle
//! testable without a DOM.

use crate::models::{HabitEntry, HabitStats};

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct CardState {
    pub loading: bool,
    pub entries: Vec<HabitEntry>,
    pub stats: Option<HabitStats>,
    pub error: Option<String>,
}

#[derive(Clone, Debug)]
pub(crate) enum CardEvent {
    LoadStarted,
    Loaded {
        entries: Vec<HabitEntry>,
        stats: HabitStats,
    },
    LoadFailed(String),
}

pub(crate) fn reduce(mut state: CardState, event: CardEvent) -> CardState {
    match event {
        CardEvent::LoadStarted => {
            state.loading = true;
            state.error = None;
        }
        CardEvent::Loaded { entries, stats } => {
            state.loading = false;
            state.entries = entries;
            state.stats = Some(stats);
            state.error = None;
        }
        CardEvent::LoadFailed(message) => {
            // Keep the previous snapshot; a failed reload must not blank
            // out data the user is already looking at.
            state.loading = false;
            state.error = Some(message);
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some_stats() -> HabitStats {
        HabitStats {
            habit_id: 1,
            habit_name: "Drink water".to_string(),
            total_days: 2,
            completed_days: 1,
            completion_rate: 50.0,
            current_streak: 1,
            longest_streak: 1,
        }
    }

    fn some_entry(id: i64) -> HabitEntry {
        HabitEntry {
            id,
            habit_id: 1,
            date: "2024-01-01".to_string(),
            completed: true,
            notes: None,
        }
    }

    #[test]
    fn load_started_sets_loading_and_clears_error() {
        let state = CardState {
            error: Some("boom".to_string()),
            ..CardState::default()
        };
        let next = reduce(state, CardEvent::LoadStarted);
        assert!(next.loading);
        assert!(next.error.is_none());
    }

    #[test]
    fn loaded_replaces_snapshot_and_clears_loading() {
        let state = reduce(CardState::default(), CardEvent::LoadStarted);
        let next = reduce(
            state,
            CardEvent::Loaded {
                entries: vec![some_entry(1)],
                stats: some_stats(),
            },
        );
        assert!(!next.loading);
        assert_eq!(next.entries.len(), 1);
        assert_eq!(next.stats.as_ref().map(|s| s.completed_days), Some(1));
        assert!(next.error.is_none());
    }

    #[test]
    fn failed_load_keeps_previous_snapshot() {
        let loaded = reduce(
            CardState::default(),
            CardEvent::Loaded {
                entries: vec![some_entry(1), some_entry(2)],
                stats: some_stats(),
            },
        );
        let next = reduce(
            reduce(loaded, CardEvent::LoadStarted),
            CardEvent::LoadFailed("backend down".to_string()),
        );
        assert!(!next.loading);
        assert_eq!(next.entries.len(), 2);
        assert!(next.stats.is_some());
        assert_eq!(next.error.as_deref(), Some("backend down"));
    }
}
