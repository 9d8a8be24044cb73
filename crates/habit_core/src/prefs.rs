use serde::{Deserialize, Serialize};

/// Colour scheme preference; dark is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

pub const SUPPORTED_LANGUAGES: [&str; 12] = [
    "ko", "en", "ja", "zh", "es", "pt", "id", "tr", "de", "fr", "hi", "ru",
];

pub const DEFAULT_LANGUAGE: &str = "en";

pub fn is_supported_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_round_trips_and_rejects_junk() {
        assert_eq!(Theme::parse("light"), Some(Theme::Light));
        assert_eq!(Theme::parse(Theme::Dark.as_str()), Some(Theme::Dark));
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn language_validation_matches_the_supported_set() {
        assert!(is_supported_language("en"));
        assert!(is_supported_language("ko"));
        assert!(!is_supported_language("xx"));
        assert!(is_supported_language(DEFAULT_LANGUAGE));
    }
}
