//! Stopword filtering
//!
//! The default filter is a curated French list tuned for study documents.
//! Lists for other languages come from the `stop-words` crate and are only
//! used when configured explicitly.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// Curated French stopwords (articles, pronouns, liaison words)
const FRENCH_CURATED: &[&str] = &[
    "le", "la", "les", "un", "une", "des", "de", "du", "d'", "et", "ou", "mais", "dans", "pour",
    "par", "avec", "sans", "sous", "sur", "au", "aux", "ce", "cet", "cette", "ces", "mon", "ton",
    "son", "notre", "votre", "leur", "nos", "vos", "leurs", "qui", "que", "quoi", "dont", "où",
    "est", "sont", "était", "étaient", "été", "être", "avoir", "fait", "faire", "comme", "plus",
    "moins", "afin", "ainsi", "alors", "ceci", "cela", "celui", "celle", "très", "tout", "tous",
    "toutes", "lors", "depuis", "chez", "car", "donc", "or", "ni", "si", "quand",
];

/// A filter for removing stopwords from text
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::french_curated()
    }
}

impl StopwordFilter {
    /// Create a filter from the `stop-words` list for the given language
    ///
    /// Supported languages: en, de, fr, es, it, pt, nl, ru, sv, no, da, fi, hu, tr, pl, ar
    pub fn new(language: &str) -> Self {
        Self {
            stopwords: Self::load_stopwords(language),
        }
    }

    /// The curated French list used by default
    pub fn french_curated() -> Self {
        Self::from_list(FRENCH_CURATED)
    }

    /// Pick the filter described by a configured language code
    pub fn from_language(language: Option<&str>) -> Self {
        match language {
            Some(lang) => Self::new(lang),
            None => Self::french_curated(),
        }
    }

    /// Create an empty stopword filter (no filtering)
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        let stopwords: FxHashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
        Self { stopwords }
    }

    /// Add additional stopwords to the filter
    pub fn add_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.insert(word.to_lowercase());
        }
    }

    /// Check if a word is a stopword (case-insensitive)
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    /// Get the number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    fn load_stopwords(language: &str) -> FxHashSet<String> {
        let lang = match language.to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            "sv" | "swedish" => LANGUAGE::Swedish,
            "no" | "norwegian" => LANGUAGE::Norwegian,
            "da" | "danish" => LANGUAGE::Danish,
            "fi" | "finnish" => LANGUAGE::Finnish,
            "hu" | "hungarian" => LANGUAGE::Hungarian,
            "tr" | "turkish" => LANGUAGE::Turkish,
            "pl" | "polish" => LANGUAGE::Polish,
            "ar" | "arabic" => LANGUAGE::Arabic,
            _ => LANGUAGE::French,
        };

        get(lang).iter().map(|s| s.to_lowercase()).collect()
    }
}
