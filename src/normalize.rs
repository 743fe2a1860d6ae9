//! Word normalizers for frequency counting.
//!
//! A [`Normalizer`] maps a surface word form to the canonical form that is
//! counted, so that "сообщения" and "сообщение" land in the same bucket.
//! The analyzer only depends on the trait:
//!
//! - [`IdentityNormalizer`] - counts tokens as they are
//! - [`SnowballNormalizer`] - Snowball stemming (`stemming` feature)
//! - any `Fn(&str) -> String` closure
//!
//! # Example
//!
//! ```rust
//! use chatlens::normalize::{IdentityNormalizer, Normalizer};
//!
//! assert_eq!(IdentityNormalizer.normalize("words"), "words");
//!
//! let strip_s = |w: &str| w.trim_end_matches('s').to_string();
//! assert_eq!(strip_s.normalize("words"), "word");
//! ```

/// Maps a token to its canonical form.
///
/// Implementations must be deterministic: the same token always yields the
/// same result.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, word: &str) -> String;
}

impl<F> Normalizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn normalize(&self, word: &str) -> String {
        self(word)
    }
}

/// Leaves every token unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNormalizer;

impl Normalizer for IdentityNormalizer {
    fn normalize(&self, word: &str) -> String {
        word.to_string()
    }
}

#[cfg(feature = "stemming")]
pub use snowball::SnowballNormalizer;

#[cfg(feature = "stemming")]
mod snowball {
    use rust_stemmers::{Algorithm, Stemmer};

    use super::Normalizer;
    use crate::config::Language;

    /// Snowball stemmer for the chat language.
    pub struct SnowballNormalizer {
        stemmer: Stemmer,
        language: Language,
    }

    impl SnowballNormalizer {
        pub fn new(language: Language) -> Self {
            let algorithm = match language {
                Language::Russian => Algorithm::Russian,
                Language::English => Algorithm::English,
            };
            Self {
                stemmer: Stemmer::create(algorithm),
                language,
            }
        }

        pub fn language(&self) -> Language {
            self.language
        }
    }

    impl std::fmt::Debug for SnowballNormalizer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("SnowballNormalizer")
                .field("language", &self.language)
                .finish()
        }
    }

    impl Normalizer for SnowballNormalizer {
        fn normalize(&self, word: &str) -> String {
            self.stemmer.stem(word).into_owned()
        }
    }
}
