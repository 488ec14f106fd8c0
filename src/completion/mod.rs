//! The completion-toggle engine.
//!
//! A habit has at most one entry per calendar day. Toggling completion for
//! "today" is a pure decision over the known entries: update the existing
//! today-entry (flipping `completed`, everything else preserved) or create a
//! fresh one marked completed. The caller executes the resulting plan against
//! the backend and reloads.

use crate::models::{CreateHabitEntryRequest, HabitEntry};
use crate::util::CalendarDay;

/// The write the toggle decided on.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TogglePlan {
    /// POST /habit-entries/
    Create(CreateHabitEntryRequest),
    /// PUT /habit-entries/{entry_id}
    Update {
        entry_id: i64,
        request: CreateHabitEntryRequest,
    },
}

/// Finds the entry belonging to `today`.
///
/// Entries whose date fails to truncate to a calendar day never match.
/// Under duplicate same-day entries (a backend invariant violation) the
/// entry with the smallest id wins, so the pick is deterministic no matter
/// how the backend ordered the list.
pub(crate) fn today_entry(entries: &[HabitEntry], today: CalendarDay) -> Option<&HabitEntry> {
    entries
        .iter()
        .filter(|e| CalendarDay::from_timestamp(&e.date) == Some(today))
        .min_by_key(|e| e.id)
}

/// Decides the toggle write for `habit_id` given its known entries.
pub(crate) fn plan_toggle(
    habit_id: i64,
    today: CalendarDay,
    entries: &[HabitEntry],
) -> TogglePlan {
    match today_entry(entries, today) {
        Some(entry) => TogglePlan::Update {
            entry_id: entry.id,
            request: CreateHabitEntryRequest {
                habit_id,
                // Preserved verbatim; the backend keys the entry by id.
                date: entry.date.clone(),
                completed: !entry.completed,
                notes: entry.notes.clone(),
            },
        },
        None => TogglePlan::Create(CreateHabitEntryRequest {
            habit_id,
            // Date-only wire form: the value the daily contract keys on.
            date: today.to_string(),
            completed: true,
            notes: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, date: &str, completed: bool, notes: Option<&str>) -> HabitEntry {
        HabitEntry {
            id,
            habit_id: 1,
            date: date.to_string(),
            completed,
            notes: notes.map(|s| s.to_string()),
        }
    }

    const TODAY: CalendarDay = CalendarDay {
        year: 2024,
        month: 1,
        day: 1,
    };

    #[test]
    fn zero_entries_creates_completed_entry_dated_today() {
        let plan = plan_toggle(1, TODAY, &[]);
        assert_eq!(
            plan,
            TogglePlan::Create(CreateHabitEntryRequest {
                habit_id: 1,
                date: "2024-01-01".to_string(),
                completed: true,
                notes: None,
            })
        );
    }

    #[test]
    fn existing_today_entry_flips_completed_and_preserves_rest() {
        let entries = vec![entry(10, "2024-01-01T00:00:00", false, Some("late start"))];
        let plan = plan_toggle(1, TODAY, &entries);
        assert_eq!(
            plan,
            TogglePlan::Update {
                entry_id: 10,
                request: CreateHabitEntryRequest {
                    habit_id: 1,
                    date: "2024-01-01T00:00:00".to_string(),
                    completed: true,
                    notes: Some("late start".to_string()),
                },
            }
        );
    }

    #[test]
    fn toggling_a_completed_entry_unmarks_it() {
        let entries = vec![entry(10, "2024-01-01", true, None)];
        match plan_toggle(1, TODAY, &entries) {
            TogglePlan::Update { request, .. } => assert!(!request.completed),
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn toggling_twice_is_idempotent_on_the_day() {
        // Create, then, once the created entry is known, update the same day.
        let plan = plan_toggle(1, TODAY, &[]);
        let TogglePlan::Create(created) = plan else {
            panic!("expected create");
        };

        let entries = vec![HabitEntry {
            id: 42,
            habit_id: created.habit_id,
            date: created.date,
            completed: created.completed,
            notes: created.notes,
        }];
        match plan_toggle(1, TODAY, &entries) {
            TogglePlan::Update { entry_id, request } => {
                assert_eq!(entry_id, 42);
                assert!(!request.completed);
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn entries_on_other_days_never_match() {
        let entries = vec![
            entry(1, "2023-12-31T23:59:59", true, None),
            entry(2, "2024-01-02T00:00:00", true, None),
        ];
        assert!(today_entry(&entries, TODAY).is_none());
        assert!(matches!(
            plan_toggle(1, TODAY, &entries),
            TogglePlan::Create(_)
        ));
    }

    #[test]
    fn today_lookup_ignores_time_of_day() {
        let entries = vec![entry(7, "2024-01-01T18:45:12", false, None)];
        assert_eq!(today_entry(&entries, TODAY).map(|e| e.id), Some(7));
    }

    #[test]
    fn duplicate_same_day_entries_pick_lowest_id() {
        let entries = vec![
            entry(30, "2024-01-01T09:00:00", true, None),
            entry(12, "2024-01-01T08:00:00", false, Some("first")),
            entry(25, "2024-01-01", true, None),
        ];
        let picked = today_entry(&entries, TODAY).expect("should find a today entry");
        assert_eq!(picked.id, 12);

        // The plan updates the picked entry, not any other duplicate.
        match plan_toggle(1, TODAY, &entries) {
            TogglePlan::Update { entry_id, request } => {
                assert_eq!(entry_id, 12);
                assert!(request.completed);
                assert_eq!(request.notes.as_deref(), Some("first"));
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn malformed_entry_dates_are_skipped() {
        let entries = vec![
            entry(1, "not-a-date", true, None),
            entry(2, "2024-01-01", false, None),
        ];
        assert_eq!(today_entry(&entries, TODAY).map(|e| e.id), Some(2));
    }
}
