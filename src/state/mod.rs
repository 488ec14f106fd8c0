pub(crate) mod habit_card;

use crate::api::ApiClient;
use crate::models::Habit;
use leptos::prelude::*;

#[derive(Clone)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Loaded from backend; the client never mutates a habit without an
    /// immediate remote write.
    pub habits: RwSignal<Vec<Habit>>,
    pub habits_loading: RwSignal<bool>,
    pub habits_error: RwSignal<Option<String>>,

    /// Habit-list load guard (ignore stale responses).
    pub habits_request_id: RwSignal<u64>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::from_env()),
            habits: RwSignal::new(vec![]),
            habits_loading: RwSignal::new(true),
            habits_error: RwSignal::new(None),
            habits_request_id: RwSignal::new(0),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);

/// Drops a habit from the local list after the backend confirmed the delete.
/// Unknown ids leave the list untouched.
pub(crate) fn remove_habit(habits: &mut Vec<Habit>, id: i64) {
    habits.retain(|h| h.id != id);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn habit(id: i64, name: &str) -> Habit {
        Habit {
            id,
            name: name.to_string(),
            description: None,
            created_at: "2024-01-01T00:00:00".to_string(),
        }
    }

    #[test]
    fn remove_habit_drops_only_the_matching_id() {
        let mut habits = vec![habit(1, "Read"), habit(2, "Run"), habit(3, "Write")];
        remove_habit(&mut habits, 2);
        assert_eq!(
            habits.iter().map(|h| h.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn remove_habit_with_unknown_id_keeps_the_list() {
        let mut habits = vec![habit(1, "Read"), habit(2, "Run")];
        remove_habit(&mut habits, 99);
        assert_eq!(habits.len(), 2);
    }

    #[test]
    fn remove_habit_on_empty_list_is_a_noop() {
        let mut habits: Vec<Habit> = vec![];
        remove_habit(&mut habits, 1);
        assert!(habits.is_empty());
    }
}
