use chrono::{Months, NaiveDate};
use serde::Serialize;

use crate::habit::HabitId;
use crate::store::HabitStore;

/// One day of the rolling-year grid. Levels run 0 (nothing) through 4
/// (everything done).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub level: u8,
}

/// Daily cells from one calendar year before `as_of` through `as_of`
/// inclusive, in ascending date order.
///
/// With a habit selected the scale is binary: 4 when that day is
/// completed, otherwise 0. Across all habits the level grades by the
/// share of habits completed that day.
pub fn heatmap(store: &HabitStore, habit: Option<&HabitId>, as_of: NaiveDate) -> Vec<HeatmapCell> {
    let start = as_of
        .checked_sub_months(Months::new(12))
        .unwrap_or(as_of);

    let mut cells = Vec::new();
    let mut date = start;
    while date <= as_of {
        let level = match habit {
            Some(id) => {
                if store.is_completed(id, date) {
                    4
                } else {
                    0
                }
            }
            None => all_habits_level(store, date),
        };
        cells.push(HeatmapCell { date, level });
        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    cells
}

fn all_habits_level(store: &HabitStore, date: NaiveDate) -> u8 {
    let total = store.habits().len();
    if total == 0 {
        return 0;
    }
    let ratio = store.completed_on(date) as f64 / total as f64;
    if ratio == 1.0 {
        4
    } else if ratio >= 0.75 {
        3
    } else if ratio >= 0.5 {
        2
    } else if ratio > 0.0 {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::{Frequency, HabitDraft};

    fn add(store: &mut HabitStore, name: &str) -> HabitId {
        store.add_habit(
            HabitDraft {
                name: name.to_string(),
                icon: "🏃".to_string(),
                category: "exercise".to_string(),
                frequency: Frequency::Daily,
                goal: 30,
            },
            "2023-01-01T08:00:00Z".parse().unwrap(),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn spans_one_year_inclusive_in_ascending_order() {
        let store = HabitStore::new();
        let cells = heatmap(&store, None, date(2025, 8, 6));
        assert_eq!(cells.len(), 366);
        assert_eq!(cells.first().unwrap().date, date(2024, 8, 6));
        assert_eq!(cells.last().unwrap().date, date(2025, 8, 6));
        assert!(cells.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn leap_spans_gain_a_day() {
        let cells = heatmap(&HabitStore::new(), None, date(2024, 8, 6));
        assert_eq!(cells.len(), 367); // crosses 2024-02-29
    }

    #[test]
    fn single_habit_mode_is_binary() {
        let mut store = HabitStore::new();
        let id = add(&mut store, "Run");
        let as_of = date(2025, 8, 6);
        store.toggle_completion(&id, as_of);
        store.toggle_completion(&id, date(2025, 8, 1));

        let cells = heatmap(&store, Some(&id), as_of);
        assert_eq!(cells.last().unwrap().level, 4);
        let first_of_month = cells.iter().find(|cell| cell.date == date(2025, 8, 1)).unwrap();
        assert_eq!(first_of_month.level, 4);
        let unmarked = cells.iter().find(|cell| cell.date == date(2025, 8, 2)).unwrap();
        assert_eq!(unmarked.level, 0);
    }

    #[test]
    fn all_habits_mode_grades_by_completion_share() {
        let mut store = HabitStore::new();
        let ids: Vec<_> = ["a", "b", "c", "d"]
            .iter()
            .map(|name| add(&mut store, name))
            .collect();
        let as_of = date(2025, 8, 6);

        // day -> how many of the four habits were done
        let expectations = [
            (date(2025, 8, 6), 4, 4u8),
            (date(2025, 8, 5), 3, 3),
            (date(2025, 8, 4), 2, 2),
            (date(2025, 8, 3), 1, 1),
            (date(2025, 8, 2), 0, 0),
        ];
        for (day, done, _) in &expectations {
            for id in ids.iter().take(*done) {
                store.toggle_completion(id, *day);
            }
        }

        let cells = heatmap(&store, None, as_of);
        for (day, _, level) in &expectations {
            let cell = cells.iter().find(|cell| cell.date == *day).unwrap();
            assert_eq!(cell.level, *level, "level for {day}");
        }
    }

    #[test]
    fn zero_habits_render_flat() {
        let cells = heatmap(&HabitStore::new(), None, date(2025, 8, 6));
        assert!(cells.iter().all(|cell| cell.level == 0));
    }
}
