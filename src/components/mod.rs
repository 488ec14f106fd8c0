pub mod habit_card;
pub mod ui;
