use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A motivational quote, one per calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

const CATALOG: [(&str, &str); 10] = [
    (
        "Success is the sum of small efforts repeated day in and day out.",
        "Robert Collier",
    ),
    (
        "You are what you repeatedly do. Excellence, then, is not an act, but a habit.",
        "Aristotle",
    ),
    (
        "The secret of your success is determined by your daily habits.",
        "Unknown",
    ),
    (
        "Don't watch the clock; do what it does. Keep going.",
        "Sam Levenson",
    ),
    (
        "Excellence is not a destination; it is a continuous journey.",
        "Unknown",
    ),
    (
        "Start where you are, use what you have, do what you can.",
        "Arthur Ashe",
    ),
    (
        "The only way to do great work is to love what you do.",
        "Steve Jobs",
    ),
    (
        "Your limitation—it's only your imagination. Push beyond.",
        "Unknown",
    ),
    ("Great things never came from comfort zones.", "Unknown"),
    ("Dream bigger. Do bigger.", "Unknown"),
];

/// Picks the quote for a calendar day. The pick is scrambled so
/// consecutive days do not walk the catalog in order, but it is stable for
/// a given day and therefore always agrees with the cached copy.
pub fn quote_for(as_of: NaiveDate) -> Quote {
    let index = scramble(as_of.num_days_from_ce() as u64) as usize % CATALOG.len();
    let (text, author) = CATALOG[index];
    Quote {
        text: text.to_string(),
        author: author.to_string(),
    }
}

// splitmix64 finalizer
fn scramble(seed: u64) -> u64 {
    let mut value = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
    value = (value ^ (value >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    value = (value ^ (value >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    value ^ (value >> 31)
}
