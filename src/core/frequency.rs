//! Word frequency analysis.
//!
//! Pipeline, per message:
//! 1. Flatten the text
//! 2. Delete punctuation (ASCII punctuation plus `«»—…“”`)
//! 3. Lowercase and split on whitespace
//! 4. Drop stop words
//! 5. Normalize each token with the injected [`Normalizer`]
//! 6. Count
//!
//! The ranking is by descending count; words with equal counts keep the
//! order in which they were first seen.
//!
//! # Example
//!
//! ```
//! use chatlens::Message;
//! use chatlens::core::frequency::FrequencyTable;
//! use chatlens::normalize::IdentityNormalizer;
//! use std::collections::HashSet;
//!
//! let messages = vec![
//!     Message::new(1, "rust, rust and more rust!"),
//!     Message::new(2, "more tests"),
//! ];
//! let stop: HashSet<String> = ["and".to_string()].into();
//!
//! let table = FrequencyTable::from_messages(&messages, &stop, &IdentityNormalizer);
//! let top = table.top(2);
//! assert_eq!(top[0].word, "rust");
//! assert_eq!(top[0].count, 3);
//! assert_eq!(top[1].word, "more");
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::normalize::Normalizer;

/// Typographic marks removed in addition to ASCII punctuation.
const EXTRA_PUNCTUATION: &[char] = &['«', '»', '—', '…', '“', '”'];

/// Common Russian function words excluded from counting.
pub const RUSSIAN_STOP_WORDS: &[&str] = &[
    "и", "в", "во", "не", "что", "он", "на", "я", "с", "со", "как", "а", "то", "все", "она",
    "так", "его", "но", "да", "ты", "к", "у", "же", "вы", "за", "бы", "по", "только", "ее",
    "мне", "было", "вот", "от", "меня", "еще", "нет", "о", "из", "ему", "теперь", "когда",
    "даже", "ну", "вдруг", "ли", "если", "уже", "или", "ни", "быть", "был", "него", "до",
    "вас", "нибудь", "опять", "уж", "вам", "ведь", "там", "потом", "себя", "ничего", "ей",
    "может", "они", "тут", "где", "есть", "надо", "ней", "для", "мы", "тебя", "их", "чем",
    "была", "сам", "чтоб", "без", "будто", "чего", "раз", "тоже", "себе", "под", "будет",
];

/// Common English function words excluded from counting.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
    "because", "been", "but", "by", "can", "could", "did", "do", "does", "for", "from", "had",
    "has", "have", "he", "her", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "just", "me", "my", "no", "not", "now", "of", "on", "or", "our", "out", "she", "so", "some",
    "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "to",
    "too", "up", "us", "was", "we", "were", "what", "when", "where", "which", "who", "will",
    "with", "would", "you", "your",
];

/// A word and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Counts of normalized words, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<WordCount>,
    positions: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts words over a whole batch.
    pub fn from_messages(
        messages: &[Message],
        stop_words: &HashSet<String>,
        normalizer: &dyn Normalizer,
    ) -> Self {
        let mut table = Self::new();
        for msg in messages {
            table.add_text(&msg.text_content(), stop_words, normalizer);
        }
        table
    }

    /// Runs one text through the pipeline and counts its words.
    pub fn add_text(&mut self, text: &str, stop_words: &HashSet<String>, normalizer: &dyn Normalizer) {
        for token in tokenize(text) {
            if stop_words.contains(&token) {
                continue;
            }
            let word = normalizer.normalize(&token);
            if word.is_empty() {
                continue;
            }
            self.add(word);
        }
    }

    /// Increments the count of an already normalized word.
    pub fn add(&mut self, word: String) {
        if let Some(&pos) = self.positions.get(&word) {
            self.entries[pos].count += 1;
        } else {
            self.positions.insert(word.clone(), self.entries.len());
            self.entries.push(WordCount { word, count: 1 });
        }
    }

    pub fn count(&self, word: &str) -> usize {
        self.positions
            .get(word)
            .map(|&pos| self.entries[pos].count)
            .unwrap_or(0)
    }

    /// The `k` most frequent words. Equal counts keep first-seen order.
    pub fn top(&self, k: usize) -> Vec<WordCount> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(k);
        ranked
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of counted tokens.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

/// Strips punctuation, lowercases and splits the text into tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text.chars().filter(|c| !is_punctuation(*c)).collect();
    cleaned
        .to_lowercase()
        .split_whitespace()
        .map(ToString::to_string)
        .collect()
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || EXTRA_PUNCTUATION.contains(&c)
}

/// The `k` most frequent normalized words of a batch.
pub fn word_frequencies(
    messages: &[Message],
    stop_words: &HashSet<String>,
    normalizer: &dyn Normalizer,
    k: usize,
) -> Vec<WordCount> {
    FrequencyTable::from_messages(messages, stop_words, normalizer).top(k)
}
