use serde::{Deserialize, Serialize};

/// A tracked habit as returned by the backend.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Habit {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: String,
}

/// One completion record for a (habit, calendar day) pair.
///
/// The backend stores `date` as an ISO timestamp; only its calendar-day
/// part is meaningful to this client (see `util::CalendarDay`).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct HabitEntry {
    pub id: i64,
    pub habit_id: i64,
    pub date: String,
    pub completed: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Backend-derived statistics. Read-only; recomputed on every fetch.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct HabitStats {
    pub habit_id: i64,
    pub habit_name: String,
    pub total_days: i64,
    pub completed_days: i64,
    pub completion_rate: f64,
    pub current_streak: i64,
    pub longest_streak: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct CreateHabitRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateHabitRequest {
    /// Builds the request from raw form input.
    ///
    /// A blank name yields `None`: the form rejects the submission and no
    /// request goes out. A blank description is omitted from the body.
    pub(crate) fn from_form(name: &str, description: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let description = description.trim();
        Some(Self {
            name: name.to_string(),
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct CreateHabitEntryRequest {
    pub habit_id: i64,
    pub date: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
