use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque habit identifier, unique within a store and stable for the
/// habit's lifetime. Minted from the creation timestamp in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    pub(crate) fn from_timestamp(now: DateTime<Utc>) -> Self {
        Self(now.timestamp_millis().to_string())
    }

    /// Next candidate when a freshly minted id collides with an existing one.
    pub(crate) fn bumped(&self) -> Self {
        match self.0.parse::<u64>() {
            Ok(value) => Self((value + 1).to_string()),
            Err(_) => Self(format!("{}0", self.0)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HabitId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for HabitId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Cadence metadata attached to a habit. Completion tracking treats every
/// day uniformly regardless of the chosen frequency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown frequency `{0}`; expected daily, weekly, or monthly")]
pub struct UnknownFrequency(String);

impl FromStr for Frequency {
    type Err = UnknownFrequency;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(UnknownFrequency(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub icon: String,
    pub category: String,
    pub frequency: Frequency,
    /// Target number of days; display-only, never enforced.
    pub goal: u32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "isSample", default)]
    pub is_sample: bool,
}

/// The editable field set. `id` and `created_at` stay immutable through
/// every edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitDraft {
    pub name: String,
    pub icon: String,
    pub category: String,
    pub frequency: Frequency,
    pub goal: u32,
}

/// Starter habit offered for one-tap adoption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitTemplate {
    pub name: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
}

pub const TEMPLATE_GOAL_DAYS: u32 = 30;

pub const TEMPLATES: [HabitTemplate; 8] = [
    HabitTemplate { name: "water", label: "Drink Water", icon: "💧", category: "health" },
    HabitTemplate { name: "exercise", label: "Exercise", icon: "🏃", category: "exercise" },
    HabitTemplate { name: "reading", label: "Reading", icon: "📚", category: "learning" },
    HabitTemplate { name: "meditation", label: "Meditation", icon: "🧘", category: "mindfulness" },
    HabitTemplate { name: "music", label: "Practice Music", icon: "🎵", category: "learning" },
    HabitTemplate { name: "cycling", label: "Cycling", icon: "🚴", category: "exercise" },
    HabitTemplate { name: "strength", label: "Strength Training", icon: "💪", category: "exercise" },
    HabitTemplate { name: "swimming", label: "Swimming", icon: "🏊", category: "exercise" },
];

pub fn template(name: &str) -> Option<&'static HabitTemplate> {
    TEMPLATES.iter().find(|template| template.name == name)
}

impl HabitTemplate {
    pub fn draft(&self) -> HabitDraft {
        HabitDraft {
            name: self.label.to_string(),
            icon: self.icon.to_string(),
            category: self.category.to_string(),
            frequency: Frequency::Daily,
            goal: TEMPLATE_GOAL_DAYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_round_trips_through_its_string_form() {
        for frequency in [Frequency::Daily, Frequency::Weekly, Frequency::Monthly] {
            assert_eq!(frequency.as_str().parse::<Frequency>().unwrap(), frequency);
        }
        assert!("hourly".parse::<Frequency>().is_err());
    }

    #[test]
    fn templates_resolve_by_name_and_produce_daily_drafts() {
        let water = template("water").expect("water template");
        let draft = water.draft();
        assert_eq!(draft.name, "Drink Water");
        assert_eq!(draft.frequency, Frequency::Daily);
        assert_eq!(draft.goal, TEMPLATE_GOAL_DAYS);
        assert!(template("sleep").is_none());
    }

    #[test]
    fn numeric_ids_bump_by_incrementing() {
        let id = HabitId::from("1714000000000");
        assert_eq!(id.bumped(), HabitId::from("1714000000001"));
    }
}
