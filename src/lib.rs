//! # lexistudy
//!
//! Extractive summaries and multiple-choice quizzes built from plain document
//! text with lexical statistics only: TF-ISF term weights, cosine-similarity
//! centrality, edit-distance distractor ranking and a handful of boilerplate
//! heuristics.
//!
//! ```rust,ignore
//! use lexistudy::{make_quiz, summarize, SummaryLength};
//!
//! let summary = summarize(&text, SummaryLength::Short);
//! let quiz = make_quiz(&text, 10);
//! ```
//!
//! The pipeline is stateless: every call cleans the input, strips
//! boilerplate, analyzes sentences and discards all intermediate state.
//! Enable the `tracing` feature to get a span per pipeline stage and debug
//! events at every fallback.

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Emit a debug event when the `tracing` feature is enabled.
macro_rules! trace_event {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}

pub mod cleanup;
pub mod errors;
pub mod graph;
pub mod lexical;
pub mod nlp;
pub mod pipeline;
pub mod quiz;
pub mod summarizer;
pub mod types;

pub use errors::{Result, StudyError};
pub use pipeline::runner::{
    compare_summaries, Generator, LexicalGenerator, StudyGenerator, SummaryComparison,
    SummaryReport,
};
pub use types::{
    AnalyzerConfig, BoilerplateConfig, ContextWindow, Keyword, QuizAnchor, QuizConfig, QuizItem,
    Sentence, StudyConfig, SummaryConfig, SummaryLength,
};

/// Summarize raw text with the default configuration.
///
/// Never fails: empty input yields an empty string, sentence-less input a
/// cleaned prefix of the text.
pub fn summarize(raw_text: &str, length: SummaryLength) -> String {
    summarizer::generate_summary(raw_text, length, &StudyConfig::default())
}

/// Build up to `num_questions` quiz items with the default configuration.
///
/// Option order is shuffled with an entropy-seeded generator; use
/// [`LexicalGenerator::with_seed`] for reproducible output.
pub fn make_quiz(raw_text: &str, num_questions: usize) -> Vec<QuizItem> {
    LexicalGenerator::default().make_quiz(raw_text, num_questions)
}
