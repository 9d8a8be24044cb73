use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::date::CompletionKey;
use crate::habit::{Habit, HabitDraft, HabitId, HabitTemplate};

/// In-memory habit and completion state.
///
/// Passed by reference into every derived computation; persistence lives
/// behind the service. An absent completion entry means "not completed".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitStore {
    habits: Vec<Habit>,
    completions: HashMap<CompletionKey, bool>,
}

/// Shape of the two persisted values: the habit list and the completion
/// table keyed by the compound string encoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub completions: HashMap<String, bool>,
}

impl HabitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn habit(&self, id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|habit| &habit.id == id)
    }

    /// Creates a habit, minting an id from the creation timestamp. Ids stay
    /// unique: a collision bumps the candidate until it is free.
    pub fn add_habit(&mut self, draft: HabitDraft, now: DateTime<Utc>) -> HabitId {
        let mut id = HabitId::from_timestamp(now);
        while self.habit(&id).is_some() {
            id = id.bumped();
        }
        self.habits.push(Habit {
            id: id.clone(),
            name: draft.name,
            icon: draft.icon,
            category: draft.category,
            frequency: draft.frequency,
            goal: draft.goal,
            created_at: now,
            is_sample: false,
        });
        id
    }

    pub fn adopt_template(&mut self, template: &HabitTemplate, now: DateTime<Utc>) -> HabitId {
        self.add_habit(template.draft(), now)
    }

    pub(crate) fn add_sample(&mut self, template: &HabitTemplate, now: DateTime<Utc>) -> HabitId {
        let id = self.adopt_template(template, now);
        if let Some(habit) = self.habits.iter_mut().find(|habit| habit.id == id) {
            habit.is_sample = true;
        }
        id
    }

    /// Applies the editable fields; `id` and `created_at` are left alone.
    /// Returns false when no habit carries the id.
    pub fn update_habit(&mut self, id: &HabitId, draft: HabitDraft) -> bool {
        let Some(habit) = self.habits.iter_mut().find(|habit| &habit.id == id) else {
            return false;
        };
        habit.name = draft.name;
        habit.icon = draft.icon;
        habit.category = draft.category;
        habit.frequency = draft.frequency;
        habit.goal = draft.goal;
        true
    }

    /// Removes the habit and every completion entry recorded under its id.
    /// Returns false when no habit carries the id.
    pub fn delete_habit(&mut self, id: &HabitId) -> bool {
        let before = self.habits.len();
        self.habits.retain(|habit| &habit.id != id);
        if self.habits.len() == before {
            return false;
        }
        self.completions.retain(|key, _| &key.habit != id);
        true
    }

    /// Flips the completion boolean for the given day and returns the new
    /// state. Toggling twice restores the original value.
    pub fn toggle_completion(&mut self, id: &HabitId, date: NaiveDate) -> bool {
        let key = CompletionKey::new(id.clone(), date);
        let state = !self.completions.get(&key).copied().unwrap_or(false);
        self.completions.insert(key, state);
        state
    }

    pub fn is_completed(&self, id: &HabitId, date: NaiveDate) -> bool {
        self.completions
            .get(&CompletionKey::new(id.clone(), date))
            .copied()
            .unwrap_or(false)
    }

    /// Number of habits with a recorded completion on the given day.
    pub fn completed_on(&self, date: NaiveDate) -> usize {
        self.habits
            .iter()
            .filter(|habit| self.is_completed(&habit.id, date))
            .count()
    }

    /// Total days the habit was ever completed.
    pub fn completed_days(&self, id: &HabitId) -> usize {
        self.completions
            .iter()
            .filter(|(key, done)| &key.habit == id && **done)
            .count()
    }

    /// Rebuilds a store from the persisted layout. Unparseable completion
    /// keys are dropped with a warning; parseable entries whose habit no
    /// longer exists are retained and simply never surface in any view.
    pub fn from_persisted(state: PersistedState) -> Self {
        let mut completions = HashMap::with_capacity(state.completions.len());
        for (raw, done) in state.completions {
            match raw.parse::<CompletionKey>() {
                Ok(key) => {
                    completions.insert(key, done);
                }
                Err(err) => warn!(%err, "dropping completion entry"),
            }
        }
        Self {
            habits: state.habits,
            completions,
        }
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            habits: self.habits.clone(),
            completions: self
                .completions
                .iter()
                .map(|(key, done)| (key.to_string(), *done))
                .collect(),
        }
    }
}
