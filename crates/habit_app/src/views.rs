use std::fmt::Write;

use chrono::NaiveDate;
use habit_core::habit::{Habit, TEMPLATES};
use habit_core::heatmap::HeatmapCell;
use habit_core::stats::{DayStat, WeekStat};
use habit_core::HabitService;

const BAR_WIDTH: usize = 20;
const LEVEL_GLYPHS: [char; 5] = ['·', '░', '▒', '▓', '█'];

pub fn today_view(service: &HabitService, today: NaiveDate) -> String {
    let quote = service.daily_quote(today);
    let habits = service.habits();

    let mut out = String::new();
    let _ = writeln!(out, "\"{}\" — {}", quote.text, quote.author);
    let _ = writeln!(out);

    if habits.is_empty() {
        let _ = writeln!(out, "No habits yet. Add one with `habits add` or pick a template.");
        return out;
    }

    let mut completed = 0;
    for habit in &habits {
        let done = service.is_completed(&habit.id, today);
        if done {
            completed += 1;
        }
        let streak = service.current_streak(&habit.id, today);
        let flame = if streak > 0 {
            format!("  🔥 {streak}")
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "[{}] {} {}  ({} · {}){}",
            if done { "x" } else { " " },
            habit.icon,
            habit.name,
            habit.category,
            habit.frequency,
            flame
        );
    }

    let total = habits.len();
    let rate = if total > 0 {
        ((completed as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    };
    let _ = writeln!(out);
    let _ = writeln!(out, "{completed}/{total} completed today ({rate}%)");
    out
}

pub fn list_view(service: &HabitService, today: NaiveDate) -> String {
    let habits = service.habits();
    if habits.is_empty() {
        return "No habits yet. Add one with `habits add` or pick a template.\n".to_string();
    }

    let mut out = String::new();
    for habit in &habits {
        let _ = writeln!(out, "{}", habit_line(service, habit, today));
    }
    out
}

fn habit_line(service: &HabitService, habit: &Habit, today: NaiveDate) -> String {
    let streak = service.current_streak(&habit.id, today);
    let done_days = service.completed_days(&habit.id);
    let sample = if habit.is_sample { " (sample)" } else { "" };
    format!(
        "{} {}{}\n    id {} · {} · {} · goal {} days · done {} days · streak {}",
        habit.icon,
        habit.name,
        sample,
        habit.id,
        habit.category,
        habit.frequency,
        habit.goal,
        done_days,
        streak
    )
}

pub fn templates_view() -> String {
    let mut out = String::from("Starter templates:\n");
    for template in &TEMPLATES {
        let _ = writeln!(
            out,
            "  {:<12} {} {} ({})",
            template.name, template.icon, template.label, template.category
        );
    }
    out.push_str("\nAdopt one with `habits adopt <name>`.\n");
    out
}

pub fn weekly_view(stats: &[DayStat]) -> String {
    let mut out = String::from("Last 7 days\n");
    for stat in stats {
        let _ = writeln!(
            out,
            "  {}  {}  {:>3}%  {}/{}",
            stat.label,
            bar(stat.percentage),
            stat.percentage,
            stat.completed,
            stat.total
        );
    }
    out
}

pub fn monthly_view(stats: &[WeekStat]) -> String {
    let mut out = String::from("This month\n");
    if stats.is_empty() {
        out.push_str("  (nothing to chart yet)\n");
        return out;
    }
    for stat in stats {
        let _ = writeln!(
            out,
            "  Week {}  {}  {:>3}%  {}/{}",
            stat.week,
            bar(stat.percentage),
            stat.percentage,
            stat.completed,
            stat.total
        );
    }
    out
}

pub fn badges_view(service: &HabitService, today: NaiveDate) -> String {
    let mut out = String::from("Badges\n");
    for badge in service.badges(today) {
        let state = if badge.unlocked {
            "unlocked".to_string()
        } else {
            format!("{}%", badge.progress)
        };
        let _ = writeln!(out, "  {} {:<18} {}", badge.icon, badge.label, state);
    }
    out
}

/// One row per calendar month, one glyph per day, oldest month first.
pub fn heatmap_view(cells: &[HeatmapCell]) -> String {
    let mut out = String::new();
    let mut current_month: Option<(i32, u32)> = None;
    for cell in cells {
        use chrono::Datelike;
        let month = (cell.date.year(), cell.date.month());
        if current_month != Some(month) {
            if current_month.is_some() {
                out.push('\n');
            }
            let _ = write!(out, "{}-{:02}  ", month.0, month.1);
            current_month = Some(month);
        }
        out.push(LEVEL_GLYPHS[usize::from(cell.level.min(4))]);
    }
    out.push('\n');
    let _ = writeln!(out, "\nless {} more", LEVEL_GLYPHS.iter().collect::<String>());
    out
}

fn bar(percentage: u32) -> String {
    let filled = (percentage as usize * BAR_WIDTH) / 100;
    let mut bar = String::with_capacity(BAR_WIDTH);
    for index in 0..BAR_WIDTH {
        bar.push(if index < filled { '█' } else { '░' });
    }
    bar
}
