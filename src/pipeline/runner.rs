//! Generator strategies.
//!
//! [`StudyGenerator`] is the seam between callers and whatever produces
//! summaries and quizzes. [`LexicalGenerator`] is the built-in
//! implementation; an external generator (a neural model behind a service,
//! for instance) can be supplied by the caller and selected through the
//! [`Generator`] enum without the rest of the code knowing which is in use.
//!
//! ```rust,ignore
//! use lexistudy::{Generator, LexicalGenerator, StudyGenerator, SummaryLength};
//!
//! let generator = Generator::Lexical(LexicalGenerator::default().with_seed(7));
//! let summary = generator.summarize(&text, SummaryLength::Short);
//! ```

use crate::quiz::generate_quiz_with_rng;
use crate::summarizer::generate_summary;
use crate::types::{QuizItem, StudyConfig, SummaryLength};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fmt;

// ============================================================================
// StudyGenerator — the strategy seam
// ============================================================================

/// Anything that can turn raw text into a summary and a quiz.
///
/// # Contract
///
/// - Neither method fails: degenerate input yields an empty string or an
///   empty list.
/// - `make_quiz` returns at most `num_questions` items.
pub trait StudyGenerator {
    /// Short identifier used in comparisons and logs
    fn name(&self) -> &str;

    fn summarize(&self, raw_text: &str, length: SummaryLength) -> String;

    fn make_quiz(&self, raw_text: &str, num_questions: usize) -> Vec<QuizItem>;

    /// Summary together with word counts for the summary and the source
    fn summary_report(&self, raw_text: &str, length: SummaryLength) -> SummaryReport {
        SummaryReport::new(self.summarize(raw_text, length), raw_text)
    }
}

// ============================================================================
// LexicalGenerator — built-in implementation
// ============================================================================

/// Summaries and quizzes from lexical statistics.
///
/// Without a seed, option order is shuffled from entropy on every call.
#[derive(Debug, Clone, Default)]
pub struct LexicalGenerator {
    config: StudyConfig,
    seed: Option<u64>,
}

impl LexicalGenerator {
    pub fn new(config: StudyConfig) -> Self {
        Self { config, seed: None }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: StudyConfig) -> Self {
        self.config = config;
        self
    }

    /// Shuffle options with a fixed seed so output is reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &StudyConfig {
        &self.config
    }

    fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }
}

impl StudyGenerator for LexicalGenerator {
    fn name(&self) -> &str {
        "lexical"
    }

    fn summarize(&self, raw_text: &str, length: SummaryLength) -> String {
        generate_summary(raw_text, length, &self.config)
    }

    fn make_quiz(&self, raw_text: &str, num_questions: usize) -> Vec<QuizItem> {
        generate_quiz_with_rng(raw_text, num_questions, &self.config, &mut self.rng())
    }
}

// ============================================================================
// Generator — caller-selected strategy
// ============================================================================

/// The generator a caller has chosen
pub enum Generator {
    Lexical(LexicalGenerator),
    External(Box<dyn StudyGenerator + Send + Sync>),
}

impl Generator {
    /// Wrap a caller-supplied generator
    pub fn external(generator: impl StudyGenerator + Send + Sync + 'static) -> Self {
        Generator::External(Box::new(generator))
    }

    fn inner(&self) -> &dyn StudyGenerator {
        match self {
            Generator::Lexical(lexical) => lexical,
            Generator::External(external) => external.as_ref(),
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Generator::Lexical(LexicalGenerator::default())
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generator::Lexical(lexical) => f.debug_tuple("Lexical").field(lexical).finish(),
            Generator::External(external) => f.debug_tuple("External").field(&external.name()).finish(),
        }
    }
}

impl StudyGenerator for Generator {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn summarize(&self, raw_text: &str, length: SummaryLength) -> String {
        self.inner().summarize(raw_text, length)
    }

    fn make_quiz(&self, raw_text: &str, num_questions: usize) -> Vec<QuizItem> {
        self.inner().make_quiz(raw_text, num_questions)
    }
}

// ============================================================================
// Reports
// ============================================================================

/// A summary with its size and the size of its source, in words
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    pub summary: String,
    pub word_count: usize,
    pub original_length: usize,
}

impl SummaryReport {
    pub fn new(summary: String, source: &str) -> Self {
        Self {
            word_count: summary.split_whitespace().count(),
            original_length: source.split_whitespace().count(),
            summary,
        }
    }
}

/// Two generators' summaries of the same text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryComparison {
    pub primary_name: String,
    pub primary: SummaryReport,
    pub secondary_name: String,
    pub secondary: SummaryReport,
}

impl SummaryComparison {
    /// Word-count difference, primary minus secondary
    pub fn word_count_delta(&self) -> i64 {
        self.primary.word_count as i64 - self.secondary.word_count as i64
    }
}

/// Summarize `raw_text` with both generators
pub fn compare_summaries(
    primary: &dyn StudyGenerator,
    secondary: &dyn StudyGenerator,
    raw_text: &str,
    length: SummaryLength,
) -> SummaryComparison {
    SummaryComparison {
        primary_name: primary.name().to_string(),
        primary: primary.summary_report(raw_text, length),
        secondary_name: secondary.name().to_string(),
        secondary: secondary.summary_report(raw_text, length),
    }
}
