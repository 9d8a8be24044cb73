use chrono::NaiveDate;
use serde::Serialize;

use crate::store::HabitStore;
use crate::streak::{average_current_streak, max_current_streak};

/// Unlock condition, dispatched by match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeRequirement {
    /// Best current streak across all habits reaches the threshold.
    Streak(u32),
    /// Mean current streak across all habits reaches the threshold.
    AverageStreak(u32),
}

/// Catalog entry for one achievement badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub requirement: BadgeRequirement,
}

pub const BADGES: [BadgeSpec; 6] = [
    BadgeSpec {
        id: "streak7",
        label: "7-Day Streak",
        icon: "🔥",
        requirement: BadgeRequirement::Streak(7),
    },
    BadgeSpec {
        id: "streak30",
        label: "30-Day Streak",
        icon: "🏆",
        requirement: BadgeRequirement::Streak(30),
    },
    BadgeSpec {
        id: "streak100",
        label: "100-Day Streak",
        icon: "👑",
        requirement: BadgeRequirement::Streak(100),
    },
    BadgeSpec {
        id: "early",
        label: "Early Bird",
        icon: "🌅",
        requirement: BadgeRequirement::AverageStreak(10),
    },
    BadgeSpec {
        id: "consistent",
        label: "Consistency Star",
        icon: "⭐",
        requirement: BadgeRequirement::AverageStreak(10),
    },
    BadgeSpec {
        id: "allstar",
        label: "All-Star",
        icon: "✨",
        requirement: BadgeRequirement::AverageStreak(10),
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeStatus {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub unlocked: bool,
    pub progress: u32,
}

/// Evaluates the whole catalog against the store's current streak data.
/// With no habits both metrics are zero and every badge is locked at 0%.
pub fn evaluate_badges(store: &HabitStore, as_of: NaiveDate) -> Vec<BadgeStatus> {
    let max_streak = f64::from(max_current_streak(store, as_of));
    let average_streak = average_current_streak(store, as_of);

    BADGES
        .iter()
        .map(|spec| {
            let (metric, threshold) = match spec.requirement {
                BadgeRequirement::Streak(threshold) => (max_streak, threshold),
                BadgeRequirement::AverageStreak(threshold) => (average_streak, threshold),
            };
            let threshold = f64::from(threshold);
            BadgeStatus {
                id: spec.id,
                label: spec.label,
                icon: spec.icon,
                unlocked: metric >= threshold,
                progress: ((metric / threshold * 100.0).round() as u32).min(100),
            }
        })
        .collect()
}
