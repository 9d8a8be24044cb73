use std::fs;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use habit_core::habit::{template, Frequency, HabitDraft};
use habit_core::storage::FileStore;
use habit_core::HabitService;
use tempfile::tempdir;

fn now() -> DateTime<Utc> {
    "2025-08-01T07:30:00Z".parse().expect("timestamp")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("date")
}

fn open_service(path: &std::path::Path) -> HabitService {
    let storage = FileStore::open(path).expect("open storage");
    HabitService::builder()
        .with_storage(Box::new(storage))
        .build()
        .expect("build service")
}

#[test]
fn habits_completions_and_views_survive_a_restart() {
    let temp = tempdir().expect("tempdir");
    let data_file = temp.path().join("data.json");
    let today = date(2025, 8, 1);

    let (run, read) = {
        let service = open_service(&data_file);
        let run = service.add_habit(
            HabitDraft {
                name: "Morning Run".to_string(),
                icon: "🏃".to_string(),
                category: "exercise".to_string(),
                frequency: Frequency::Daily,
                goal: 30,
            },
            now(),
        );
        let read = service.adopt_template(template("reading").expect("template"), now());

        for offset in 0..5 {
            service
                .toggle_completion(&run, today - Duration::days(offset))
                .expect("toggle");
        }
        service.toggle_completion(&read, today).expect("toggle");
        service.set_theme(habit_core::prefs::Theme::Light).expect("theme");
        (run, read)
    };

    let reopened = open_service(&data_file);
    assert_eq!(reopened.habits().len(), 2);
    assert_eq!(reopened.current_streak(&run, today), 5);
    assert_eq!(reopened.current_streak(&read, today), 1);
    assert_eq!(reopened.theme(), habit_core::prefs::Theme::Light);

    let weekly = reopened.weekly_stats(today);
    assert_eq!(weekly.len(), 7);
    assert_eq!(weekly[6].completed, 2);
    assert_eq!(weekly[6].total, 2);
    assert_eq!(weekly[6].percentage, 100);

    // deleting one habit must drop its history and nothing else
    reopened.delete_habit(&run).expect("delete");
    drop(reopened);

    let after_delete = open_service(&data_file);
    assert_eq!(after_delete.habits().len(), 1);
    assert_eq!(after_delete.current_streak(&read, today), 1);
    assert_eq!(after_delete.completed_days(&read), 1);

    let raw = fs::read_to_string(&data_file).expect("read data file");
    assert!(!raw.contains(run.as_str()), "deleted habit left traces");
}

#[test]
fn a_corrupt_data_file_recovers_to_the_empty_state() {
    let temp = tempdir().expect("tempdir");
    let data_file = temp.path().join("data.json");
    fs::write(&data_file, "this is not json at all").expect("write garbage");

    let service = open_service(&data_file);
    assert!(service.habits().is_empty());
    assert!(service.monthly_stats(date(2025, 8, 1)).is_empty());

    // the next mutation rewrites the file cleanly
    let id = service.add_habit(
        HabitDraft {
            name: "Stretch".to_string(),
            icon: "🧘".to_string(),
            category: "mindfulness".to_string(),
            frequency: Frequency::Daily,
            goal: 21,
        },
        now(),
    );
    drop(service);

    let reopened = open_service(&data_file);
    assert!(reopened.habit(&id).is_some());
}
