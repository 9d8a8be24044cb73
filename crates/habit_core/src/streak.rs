use chrono::NaiveDate;

use crate::habit::HabitId;
use crate::store::HabitStore;

/// Upper bound on the backward walk. A habit completed daily for longer
/// than a year reports a plateaued streak of 365; that cap is part of the
/// behaviour, not an optimisation to remove.
pub const STREAK_WALK_CAP: u32 = 365;

/// Consecutive completed days ending at `as_of`, inclusive.
///
/// The first missing day stops the count — `as_of` itself included, so a
/// day that has not been completed yet reports 0 no matter what came
/// before it.
pub fn current_streak(store: &HabitStore, habit: &HabitId, as_of: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = as_of;
    for _ in 0..STREAK_WALK_CAP {
        if !store.is_completed(habit, day) {
            break;
        }
        streak += 1;
        day = match day.pred_opt() {
            Some(previous) => previous,
            None => break,
        };
    }
    streak
}

/// Best current streak across all habits; 0 with no habits.
pub fn max_current_streak(store: &HabitStore, as_of: NaiveDate) -> u32 {
    store
        .habits()
        .iter()
        .map(|habit| current_streak(store, &habit.id, as_of))
        .max()
        .unwrap_or(0)
}

/// Mean current streak across all habits; 0.0 with no habits.
pub fn average_current_streak(store: &HabitStore, as_of: NaiveDate) -> f64 {
    let habits = store.habits();
    if habits.is_empty() {
        return 0.0;
    }
    let total: u32 = habits
        .iter()
        .map(|habit| current_streak(store, &habit.id, as_of))
        .sum();
    f64::from(total) / habits.len() as f64
}
