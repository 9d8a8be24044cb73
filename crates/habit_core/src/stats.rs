use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::store::HabitStore;

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One day of the trailing-week view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayStat {
    pub date: NaiveDate,
    pub label: String,
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
}

/// One week bucket of the current calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekStat {
    pub week: u32,
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
}

fn percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}

fn weekday_label(date: NaiveDate) -> String {
    WEEKDAY_LABELS[date.weekday().num_days_from_monday() as usize].to_string()
}

/// The trailing seven days ending at `as_of`, oldest first.
///
/// Denominators use the habit count at call time, not whatever the store
/// held on the historical day.
pub fn weekly_stats(store: &HabitStore, as_of: NaiveDate) -> Vec<DayStat> {
    let total = store.habits().len();
    (0..7)
        .rev()
        .map(|offset| {
            let date = as_of - Duration::days(offset);
            let completed = store.completed_on(date);
            DayStat {
                date,
                label: weekday_label(date),
                completed,
                total,
                percentage: percentage(completed, total),
            }
        })
        .collect()
}

/// Week buckets (days 1-7, 8-14, ...) of the month containing `as_of`,
/// through the bucket holding `as_of` itself. Each bucket sums
/// days-in-bucket x habits; buckets with nothing to count are omitted
/// rather than zero-filled.
pub fn monthly_stats(store: &HabitStore, as_of: NaiveDate) -> Vec<WeekStat> {
    let day_of_month = as_of.day();
    let mut stats = Vec::new();
    for week in 1..=day_of_month.div_ceil(7) {
        let mut completed = 0;
        let mut total = 0;
        for slot in 1..=7u32 {
            let day = (week - 1) * 7 + slot;
            if day > day_of_month {
                break;
            }
            let Some(date) = as_of.with_day(day) else {
                continue;
            };
            for habit in store.habits() {
                total += 1;
                if store.is_completed(&habit.id, date) {
                    completed += 1;
                }
            }
        }
        if total > 0 {
            stats.push(WeekStat {
                week,
                completed,
                total,
                percentage: percentage(completed, total),
            });
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::{Frequency, HabitDraft, HabitId};

    fn draft(name: &str) -> HabitDraft {
        HabitDraft {
            name: name.to_string(),
            icon: "🏃".to_string(),
            category: "exercise".to_string(),
            frequency: Frequency::Daily,
            goal: 30,
        }
    }

    fn add(store: &mut HabitStore, name: &str) -> HabitId {
        store.add_habit(draft(name), "2024-01-01T08:00:00Z".parse().unwrap())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekly_stats_cover_exactly_seven_days_oldest_first() {
        let mut store = HabitStore::new();
        let id = add(&mut store, "Run");
        let as_of = date(2024, 3, 10); // a Sunday
        store.toggle_completion(&id, as_of);
        store.toggle_completion(&id, date(2024, 3, 4));

        let stats = weekly_stats(&store, as_of);
        assert_eq!(stats.len(), 7);
        assert_eq!(stats[0].date, date(2024, 3, 4));
        assert_eq!(stats[0].label, "Mon");
        assert_eq!(stats[6].date, as_of);
        assert_eq!(stats[6].label, "Sun");
        assert_eq!(stats[0].percentage, 100);
        assert_eq!(stats[1].percentage, 0);
        assert_eq!(stats[6].percentage, 100);
    }

    #[test]
    fn weekly_percentages_round_per_day() {
        let mut store = HabitStore::new();
        let first = add(&mut store, "Run");
        let second = add(&mut store, "Read");
        add(&mut store, "Meditate");
        let as_of = date(2024, 3, 10);
        store.toggle_completion(&first, as_of);
        store.toggle_completion(&first, date(2024, 3, 9));
        store.toggle_completion(&second, date(2024, 3, 9));

        let stats = weekly_stats(&store, as_of);
        assert_eq!(stats[6].completed, 1);
        assert_eq!(stats[6].total, 3);
        assert_eq!(stats[6].percentage, 33);
        assert_eq!(stats[5].completed, 2);
        assert_eq!(stats[5].percentage, 67);
    }

    #[test]
    fn weekly_stats_with_no_habits_are_all_zero() {
        let stats = weekly_stats(&HabitStore::new(), date(2024, 3, 10));
        assert_eq!(stats.len(), 7);
        assert!(stats.iter().all(|stat| {
            stat.completed == 0 && stat.total == 0 && stat.percentage == 0
        }));
    }

    #[test]
    fn weekly_denominator_reflects_the_current_habit_count() {
        let mut store = HabitStore::new();
        let id = add(&mut store, "Run");
        let as_of = date(2024, 3, 10);
        store.toggle_completion(&id, date(2024, 3, 8));
        // a habit added later still widens the historical denominator
        add(&mut store, "Read");

        let stats = weekly_stats(&store, as_of);
        assert_eq!(stats[4].completed, 1);
        assert_eq!(stats[4].total, 2);
        assert_eq!(stats[4].percentage, 50);
    }

    #[test]
    fn monthly_stats_bucket_by_week_of_month() {
        let mut store = HabitStore::new();
        let id = add(&mut store, "Run");
        let as_of = date(2024, 3, 10);
        for day in [1, 2, 3, 8, 9, 10] {
            store.toggle_completion(&id, date(2024, 3, day));
        }

        let stats = monthly_stats(&store, as_of);
        assert_eq!(stats.len(), 2);

        // week 1: days 1-7, one habit each day
        assert_eq!(stats[0].week, 1);
        assert_eq!(stats[0].total, 7);
        assert_eq!(stats[0].completed, 3);
        assert_eq!(stats[0].percentage, 43);

        // week 2: only days 8-10 have elapsed
        assert_eq!(stats[1].week, 2);
        assert_eq!(stats[1].total, 3);
        assert_eq!(stats[1].completed, 3);
        assert_eq!(stats[1].percentage, 100);
    }

    #[test]
    fn monthly_stats_with_no_habits_are_empty() {
        assert!(monthly_stats(&HabitStore::new(), date(2024, 3, 10)).is_empty());
    }

    #[test]
    fn first_of_the_month_yields_a_single_one_day_bucket() {
        let mut store = HabitStore::new();
        add(&mut store, "Run");
        let stats = monthly_stats(&store, date(2024, 3, 1));
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].week, 1);
        assert_eq!(stats[0].total, 1);
    }
}
