//! Configuration types for analysis and output.
//!
//! This module provides clean configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{AnalysisConfig, Language};
//!
//! let config = AnalysisConfig::new()
//!     .with_language(Language::English)
//!     .with_top_words(10)
//!     .with_stop_word("lol");
//!
//! assert!(config.stop_words().contains("the"));
//! assert!(config.stop_words().contains("lol"));
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::frequency::{ENGLISH_STOP_WORDS, RUSSIAN_STOP_WORDS};

/// Language of the analyzed chat.
///
/// Selects the built-in stop-word list and, with the `stemming` feature,
/// the Snowball stemmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Language {
    #[default]
    #[serde(alias = "ru")]
    #[cfg_attr(feature = "cli", value(alias = "ru"))]
    Russian,
    #[serde(alias = "en")]
    #[cfg_attr(feature = "cli", value(alias = "en"))]
    English,
}

impl Language {
    /// Built-in stop words for this language.
    pub fn stop_words(&self) -> &'static [&'static str] {
        match self {
            Language::Russian => RUSSIAN_STOP_WORDS,
            Language::English => ENGLISH_STOP_WORDS,
        }
    }

    /// Returns all language names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &["russian", "ru", "english", "en"]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Russian => write!(f, "Russian"),
            Language::English => write!(f, "English"),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "russian" | "ru" => Ok(Language::Russian),
            "english" | "en" => Ok(Language::English),
            _ => Err(format!(
                "Unknown language: '{}'. Expected one of: {}",
                s,
                Language::all_names().join(", ")
            )),
        }
    }
}

/// Settings for the analytics of a loaded chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of entries in the frequent-words ranking (default: 20)
    pub top_words: usize,

    /// Messages per history page (default: 50)
    pub page_size: usize,

    /// Language of the built-in stop-word list (default: Russian)
    pub language: Language,

    /// Additional stop words on top of the built-in list
    pub extra_stop_words: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_words: 20,
            page_size: 50,
            language: Language::Russian,
            extra_stop_words: Vec::new(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of ranked words.
    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    /// Sets the history page size.
    #[must_use]
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Sets the language of the built-in stop words.
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Adds one stop word. Matching happens after lowercasing.
    #[must_use]
    pub fn with_stop_word(mut self, word: impl Into<String>) -> Self {
        self.extra_stop_words.push(word.into().to_lowercase());
        self
    }

    /// The effective stop-word set.
    pub fn stop_words(&self) -> HashSet<String> {
        self.language
            .stop_words()
            .iter()
            .map(|w| (*w).to_string())
            .chain(self.extra_stop_words.iter().cloned())
            .collect()
    }
}

/// Controls which optional columns appear in message reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Include message dates
    pub include_dates: bool,
    /// Include message IDs
    pub include_ids: bool,
    /// Include reply references
    pub include_replies: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables every optional column.
    pub fn all() -> Self {
        Self {
            include_dates: true,
            include_ids: true,
            include_replies: true,
        }
    }

    #[must_use]
    pub fn with_dates(mut self) -> Self {
        self.include_dates = true;
        self
    }

    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.include_ids = true;
        self
    }

    #[must_use]
    pub fn with_replies(mut self) -> Self {
        self.include_replies = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_config_default() {
        let config = AnalysisConfig::default();
        assert_eq!(config.top_words, 20);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.language, Language::Russian);
        assert!(config.stop_words().contains("и"));
    }

    #[test]
    fn test_analysis_config_builder() {
        let config = AnalysisConfig::new()
            .with_top_words(5)
            .with_page_size(10)
            .with_language(Language::English)
            .with_stop_word("LOL");

        assert_eq!(config.top_words, 5);
        assert_eq!(config.page_size, 10);
        let stop = config.stop_words();
        assert!(stop.contains("and"));
        assert!(stop.contains("lol"));
        assert!(!stop.contains("и"));
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("ru".parse::<Language>().unwrap(), Language::Russian);
        assert_eq!("English".parse::<Language>().unwrap(), Language::English);
        assert!("klingon".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_serde() {
        let json = serde_json::to_string(&Language::English).unwrap();
        assert_eq!(json, "\"english\"");
        let parsed: Language = serde_json::from_str("\"ru\"").unwrap();
        assert_eq!(parsed, Language::Russian);
    }

    #[test]
    fn test_output_config() {
        let config = OutputConfig::new().with_dates().with_ids();
        assert!(config.include_dates);
        assert!(config.include_ids);
        assert!(!config.include_replies);
        assert_eq!(OutputConfig::all(), OutputConfig::new().with_dates().with_ids().with_replies());
    }
}
