use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

use crate::habit::HabitId;

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Formats a date as its zero-padded `YYYY-MM-DD` calendar key. Keys sort
/// lexicographically in chronological order.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}

/// Composite key for one habit's completion on one day.
///
/// Kept structured in memory so cascade deletes compare habit ids directly
/// instead of prefix-matching strings; the `"{habitId}_{YYYY-MM-DD}"`
/// encoding exists only at the persistence boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompletionKey {
    pub habit: HabitId,
    pub date: NaiveDate,
}

impl CompletionKey {
    pub fn new(habit: HabitId, date: NaiveDate) -> Self {
        Self { habit, date }
    }
}

impl fmt::Display for CompletionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.habit, date_key(self.date))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed completion key `{0}`")]
pub struct MalformedCompletionKey(pub String);

impl FromStr for CompletionKey {
    type Err = MalformedCompletionKey;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        // The date field never contains the separator, so split on the last
        // one; habit ids containing `_` still round-trip.
        let (habit, date) = raw
            .rsplit_once('_')
            .ok_or_else(|| MalformedCompletionKey(raw.to_string()))?;
        if habit.is_empty() {
            return Err(MalformedCompletionKey(raw.to_string()));
        }
        let date = parse_date_key(date).ok_or_else(|| MalformedCompletionKey(raw.to_string()))?;
        Ok(Self {
            habit: HabitId::from(habit),
            date,
        })
    }
}
