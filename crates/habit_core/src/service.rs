use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::badges::{evaluate_badges, BadgeStatus};
use crate::date::date_key;
use crate::habit::{Habit, HabitDraft, HabitId, HabitTemplate, TEMPLATES};
use crate::heatmap::{heatmap, HeatmapCell};
use crate::prefs::{is_supported_language, Theme, DEFAULT_LANGUAGE};
use crate::quotes::{self, Quote};
use crate::stats::{monthly_stats, weekly_stats, DayStat, WeekStat};
use crate::storage::{keys, KeyValueStore, StorageError};
use crate::store::{HabitStore, PersistedState};
use crate::streak;

/// How many starter habits a fresh profile is seeded with.
const SAMPLE_HABIT_COUNT: usize = 3;

/// Owns the in-memory store and its persistence lifecycle.
///
/// Mutations write through to storage immediately; a failed write is
/// logged and remembered but never rolls back the in-memory state, which
/// stays authoritative for the rest of the session.
pub struct HabitService {
    storage: Box<dyn KeyValueStore>,
    store: RwLock<HabitStore>,
    last_save_error: Mutex<Option<String>>,
}

pub struct HabitServiceBuilder {
    storage: Option<Box<dyn KeyValueStore>>,
    seed_samples: Option<DateTime<Utc>>,
}

impl HabitServiceBuilder {
    pub fn new() -> Self {
        Self {
            storage: None,
            seed_samples: None,
        }
    }

    pub fn with_storage(mut self, storage: Box<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Seed a fresh profile (one that has never persisted a habit list)
    /// with a few starter habits marked as samples.
    pub fn seed_sample_habits(mut self, now: DateTime<Utc>) -> Self {
        self.seed_samples = Some(now);
        self
    }

    pub fn build(self) -> Result<HabitService> {
        let storage = self
            .storage
            .ok_or_else(|| anyhow!("a storage collaborator is required"))?;

        let fresh_profile = matches!(storage.get(keys::HABITS), Ok(None));
        let mut store = load_store(storage.as_ref());

        let service = HabitService {
            storage,
            store: RwLock::new(HabitStore::new()),
            last_save_error: Mutex::new(None),
        };

        if fresh_profile {
            if let Some(now) = self.seed_samples {
                for template in TEMPLATES.iter().take(SAMPLE_HABIT_COUNT) {
                    store.add_sample(template, now);
                }
                info!(count = SAMPLE_HABIT_COUNT, "seeded starter habits");
                service.persist(&store);
            }
        }

        info!(habit_count = store.habits().len(), "habit service ready");
        *service.store.write() = store;
        Ok(service)
    }
}

impl Default for HabitServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn load_json<T>(storage: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match storage.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, %err, "discarding malformed persisted value");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(err) => {
            warn!(key, %err, "unable to read persisted value");
            T::default()
        }
    }
}

fn load_store(storage: &dyn KeyValueStore) -> HabitStore {
    HabitStore::from_persisted(PersistedState {
        habits: load_json(storage, keys::HABITS),
        completions: load_json(storage, keys::COMPLETIONS),
    })
}

impl HabitService {
    pub fn builder() -> HabitServiceBuilder {
        HabitServiceBuilder::new()
    }

    // --- habit and completion mutations ---------------------------------

    pub fn add_habit(&self, draft: HabitDraft, now: DateTime<Utc>) -> HabitId {
        let mut store = self.store.write();
        let id = store.add_habit(draft, now);
        self.persist(&store);
        info!(habit = %id, "habit added");
        id
    }

    pub fn adopt_template(&self, template: &HabitTemplate, now: DateTime<Utc>) -> HabitId {
        let mut store = self.store.write();
        let id = store.adopt_template(template, now);
        self.persist(&store);
        info!(habit = %id, template = template.name, "habit adopted from template");
        id
    }

    pub fn update_habit(&self, id: &HabitId, draft: HabitDraft) -> Result<()> {
        let mut store = self.store.write();
        if !store.update_habit(id, draft) {
            return Err(anyhow!("unknown habit {id}"));
        }
        self.persist(&store);
        info!(habit = %id, "habit updated");
        Ok(())
    }

    pub fn delete_habit(&self, id: &HabitId) -> Result<()> {
        let mut store = self.store.write();
        if !store.delete_habit(id) {
            return Err(anyhow!("unknown habit {id}"));
        }
        self.persist(&store);
        info!(habit = %id, "habit deleted with its completion history");
        Ok(())
    }

    pub fn toggle_completion(&self, id: &HabitId, date: NaiveDate) -> Result<bool> {
        let mut store = self.store.write();
        if store.habit(id).is_none() {
            return Err(anyhow!("unknown habit {id}"));
        }
        let state = store.toggle_completion(id, date);
        self.persist(&store);
        debug!(habit = %id, date = %date_key(date), state, "completion toggled");
        Ok(state)
    }

    // --- views ----------------------------------------------------------

    pub fn habits(&self) -> Vec<Habit> {
        self.store.read().habits().to_vec()
    }

    pub fn habit(&self, id: &HabitId) -> Option<Habit> {
        self.store.read().habit(id).cloned()
    }

    /// Clone of the current state for the pure computations.
    pub fn snapshot(&self) -> HabitStore {
        self.store.read().clone()
    }

    pub fn is_completed(&self, id: &HabitId, date: NaiveDate) -> bool {
        self.store.read().is_completed(id, date)
    }

    pub fn completed_days(&self, id: &HabitId) -> usize {
        self.store.read().completed_days(id)
    }

    pub fn current_streak(&self, id: &HabitId, as_of: NaiveDate) -> u32 {
        streak::current_streak(&self.store.read(), id, as_of)
    }

    pub fn weekly_stats(&self, as_of: NaiveDate) -> Vec<DayStat> {
        weekly_stats(&self.store.read(), as_of)
    }

    pub fn monthly_stats(&self, as_of: NaiveDate) -> Vec<WeekStat> {
        monthly_stats(&self.store.read(), as_of)
    }

    pub fn badges(&self, as_of: NaiveDate) -> Vec<BadgeStatus> {
        evaluate_badges(&self.store.read(), as_of)
    }

    pub fn heatmap(&self, habit: Option<&HabitId>, as_of: NaiveDate) -> Vec<HeatmapCell> {
        heatmap(&self.store.read(), habit, as_of)
    }

    // --- preferences and the daily quote --------------------------------

    pub fn theme(&self) -> Theme {
        match self.storage.get(keys::THEME) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_default(),
            _ => Theme::default(),
        }
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.storage
            .set(keys::THEME, theme.as_str())
            .map_err(|err| anyhow!("unable to save theme: {err}"))
    }

    pub fn language(&self) -> String {
        match self.storage.get(keys::LANGUAGE) {
            Ok(Some(code)) if is_supported_language(&code) => code,
            _ => DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn set_language(&self, code: &str) -> Result<()> {
        if !is_supported_language(code) {
            return Err(anyhow!("unsupported language `{code}`"));
        }
        self.storage
            .set(keys::LANGUAGE, code)
            .map_err(|err| anyhow!("unable to save language: {err}"))
    }

    pub fn onboarding_dismissed(&self) -> bool {
        matches!(self.storage.get(keys::ONBOARDING_DISMISSED), Ok(Some(_)))
    }

    pub fn dismiss_onboarding(&self) -> Result<()> {
        self.storage
            .set(keys::ONBOARDING_DISMISSED, "true")
            .map_err(|err| anyhow!("unable to save onboarding flag: {err}"))
    }

    /// The day's quote, cached in storage so the pick never changes within
    /// a day. A stale cache (different stored day) is replaced.
    pub fn daily_quote(&self, today: NaiveDate) -> Quote {
        let today_key = date_key(today);
        if let Ok(Some(stored)) = self.storage.get(keys::QUOTE_DATE) {
            if stored == today_key {
                if let Ok(Some(raw)) = self.storage.get(keys::CURRENT_QUOTE) {
                    if let Ok(quote) = serde_json::from_str::<Quote>(&raw) {
                        return quote;
                    }
                }
            }
        }

        let quote = quotes::quote_for(today);
        if let Err(err) = self.cache_quote(&today_key, &quote) {
            warn!(%err, "unable to cache the daily quote");
        }
        quote
    }

    fn cache_quote(&self, today_key: &str, quote: &Quote) -> Result<(), StorageError> {
        self.storage.set(keys::QUOTE_DATE, today_key)?;
        self.storage
            .set(keys::CURRENT_QUOTE, &serde_json::to_string(quote)?)?;
        Ok(())
    }

    // --- persistence ----------------------------------------------------

    /// Most recent failed save, if the last write did not reach storage.
    /// The in-memory state is still the source of truth for this session.
    pub fn last_save_error(&self) -> Option<String> {
        self.last_save_error.lock().clone()
    }

    fn persist(&self, store: &HabitStore) {
        match self.write_state(store) {
            Ok(()) => {
                *self.last_save_error.lock() = None;
            }
            Err(err) => {
                warn!(%err, "saving habit data failed; in-memory state kept for this session");
                *self.last_save_error.lock() = Some(err.to_string());
            }
        }
    }

    fn write_state(&self, store: &HabitStore) -> Result<(), StorageError> {
        let state = store.to_persisted();
        self.storage
            .set(keys::HABITS, &serde_json::to_string(&state.habits)?)?;
        self.storage
            .set(keys::COMPLETIONS, &serde_json::to_string(&state.completions)?)?;
        Ok(())
    }
}
