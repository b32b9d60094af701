//! Core value types and configuration
//!
//! Everything here lives for a single pipeline call. Types that carry
//! invariants ([`QuizAnchor`], [`QuizItem`]) validate them at construction
//! and expose read-only accessors afterwards.

use crate::errors::{Result, StudyError};
use serde::{Deserialize, Serialize};

/// A sentence extracted from cleaned document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Sentence text with internal whitespace collapsed
    pub text: String,
    /// Position among the retained sentences (0-based)
    pub index: usize,
    /// Number of whitespace-separated tokens
    pub word_count: usize,
}

impl Sentence {
    /// Create a new sentence, counting its words
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        let text = text.into();
        let word_count = text.split_whitespace().count();
        Self {
            text,
            index,
            word_count,
        }
    }
}

/// A weighted keyword (lowercase term)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    pub score: f64,
}

impl Keyword {
    pub fn new(term: impl Into<String>, score: f64) -> Self {
        Self {
            term: term.into(),
            score,
        }
    }
}

/// Tokens flanking an anchor term inside one sentence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextWindow {
    pub before: String,
    pub after: String,
}

impl ContextWindow {
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
        }
    }

    /// True when both sides carry at least one token
    pub fn is_two_sided(&self) -> bool {
        !self.before.is_empty() && !self.after.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
}

/// A (sentence, keyword) pair selected as the basis for one question
#[derive(Debug, Clone, PartialEq)]
pub struct QuizAnchor {
    sentence: Sentence,
    keyword: String,
    keyword_lower: String,
    context: ContextWindow,
    position: f64,
    score: f64,
    is_entity: bool,
}

impl QuizAnchor {
    /// Build an anchor, rejecting empty keywords, positions outside `[0, 1]`
    /// and non-finite scores.
    pub fn new(
        sentence: Sentence,
        keyword: impl Into<String>,
        context: ContextWindow,
        position: f64,
        score: f64,
        is_entity: bool,
    ) -> Result<Self> {
        let keyword = keyword.into();
        if keyword.trim().is_empty() {
            return Err(StudyError::malformed("anchor keyword is empty"));
        }
        if !(0.0..=1.0).contains(&position) {
            return Err(StudyError::malformed(format!(
                "anchor position {position} outside [0, 1]"
            )));
        }
        if !score.is_finite() {
            return Err(StudyError::malformed("anchor score is not finite"));
        }
        let keyword_lower = keyword.to_lowercase();
        Ok(Self {
            sentence,
            keyword,
            keyword_lower,
            context,
            position,
            score,
            is_entity,
        })
    }

    pub fn sentence(&self) -> &Sentence {
        &self.sentence
    }

    /// Keyword as written in the sentence
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn keyword_lower(&self) -> &str {
        &self.keyword_lower
    }

    pub fn context(&self) -> &ContextWindow {
        &self.context
    }

    /// Normalized sentence position: 0.0 for the first sentence, 1.0 for the last
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn is_entity(&self) -> bool {
        self.is_entity
    }
}

/// A validated multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizItem {
    question: String,
    options: Vec<String>,
    correct_index: usize,
    explanation: String,
}

impl QuizItem {
    /// Number of options every item carries
    pub const OPTION_COUNT: usize = 4;

    /// Build an item, checking the option count, that every option is
    /// non-empty, that options are unique ignoring case and that
    /// `correct_index` points inside the list.
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: impl Into<String>,
    ) -> Result<Self> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(StudyError::malformed("question is empty"));
        }
        if options.len() != Self::OPTION_COUNT {
            return Err(StudyError::malformed(format!(
                "expected {} options, got {}",
                Self::OPTION_COUNT,
                options.len()
            )));
        }
        if options.iter().any(|o| o.trim().is_empty()) {
            return Err(StudyError::malformed("empty option"));
        }
        let mut lowered: Vec<String> = options.iter().map(|o| o.to_lowercase()).collect();
        lowered.sort_unstable();
        lowered.dedup();
        if lowered.len() != options.len() {
            return Err(StudyError::malformed("duplicate options"));
        }
        if correct_index >= options.len() {
            return Err(StudyError::malformed(format!(
                "correct index {correct_index} out of range"
            )));
        }
        Ok(Self {
            question,
            options,
            correct_index,
            explanation: explanation.into(),
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// The option marked as correct
    pub fn correct_answer(&self) -> &str {
        &self.options[self.correct_index]
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// Requested summary length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    /// Parse a length label; unrecognized labels fall back to `Medium`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "short" => SummaryLength::Short,
            "long" => SummaryLength::Long,
            _ => SummaryLength::Medium,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SummaryLength::Short => "short",
            SummaryLength::Medium => "medium",
            SummaryLength::Long => "long",
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Thresholds for the header/footer detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoilerplateConfig {
    /// Texts shorter than this (trimmed, in characters) pass through unchanged
    pub min_chars: usize,
    /// Texts with fewer lines pass through unchanged
    pub min_lines: usize,
    /// Maximum number of non-empty lines inspected for a header
    pub scan_lines: usize,
    /// A non-header line with at least this many words ends the header scan
    pub content_min_words: usize,
    /// Indicator hits needed before a header is cut
    pub min_indicators: usize,
    /// Documents with fewer lines skip the repeated-line filter
    pub repeat_min_lines: usize,
    /// Occurrences that make a line a running header/footer
    pub repeat_min_count: usize,
    /// Only lines shorter than this are considered repeatable
    pub repeat_max_chars: usize,
    /// Only lines with at most this many words are considered repeatable
    pub repeat_max_words: usize,
}

impl Default for BoilerplateConfig {
    fn default() -> Self {
        Self {
            min_chars: 100,
            min_lines: 5,
            scan_lines: 20,
            content_min_words: 10,
            min_indicators: 2,
            repeat_min_lines: 10,
            repeat_min_count: 3,
            repeat_max_chars: 100,
            repeat_max_words: 15,
        }
    }
}

/// Parameters of the lexical analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Minimum words for a sentence to be summarized
    pub summary_min_words: usize,
    /// Minimum words for a sentence to anchor a question
    pub quiz_min_words: usize,
    /// Tokens kept on each side of an anchor
    pub context_window: usize,
    /// Maximum keywords mined for quiz anchors
    pub max_keywords: usize,
    /// Positional weight of the last sentence (the first gets 1.0)
    pub position_floor: f64,
    /// `None` uses the curated French list, otherwise a `stop-words` language code
    pub stopword_language: Option<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            summary_min_words: 3,
            quiz_min_words: 5,
            context_window: 4,
            max_keywords: 150,
            position_floor: 0.7,
            stopword_language: None,
        }
    }
}

/// Keep ratios for each summary length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub short_ratio: f64,
    pub medium_ratio: f64,
    pub long_ratio: f64,
    /// Characters kept when no sentence survives splitting
    pub fallback_prefix_chars: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            short_ratio: 0.15,
            medium_ratio: 0.30,
            long_ratio: 0.50,
            fallback_prefix_chars: 300,
        }
    }
}

impl SummaryConfig {
    pub fn ratio(&self, length: SummaryLength) -> f64 {
        match length {
            SummaryLength::Short => self.short_ratio,
            SummaryLength::Medium => self.medium_ratio,
            SummaryLength::Long => self.long_ratio,
        }
    }
}

/// Quiz assembly parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Candidates scoring below this are rejected once the quota is met
    pub quality_floor: f64,
    /// Fraction of requested questions that must exist before the floor applies
    pub quota_fraction: f64,
    /// How many questions may share one keyword
    pub max_keyword_uses: usize,
    /// Distractors requested per question
    pub max_distractors: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            quality_floor: 0.55,
            quota_fraction: 0.5,
            max_keyword_uses: 2,
            max_distractors: 6,
        }
    }
}

impl QuizConfig {
    /// Items required before the quality floor starts rejecting candidates
    pub fn quality_quota(&self, num_questions: usize) -> usize {
        ((num_questions as f64 * self.quota_fraction) as usize).max(1)
    }
}

/// Complete pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    pub boilerplate: BoilerplateConfig,
    pub analyzer: AnalyzerConfig,
    pub summary: SummaryConfig,
    pub quiz: QuizConfig,
}

impl StudyConfig {
    /// Parse a JSON configuration and validate it.
    ///
    /// Missing fields take their defaults. Only the first error-severity
    /// violation is returned; run [`ConfigValidator`](crate::pipeline::ConfigValidator)
    /// directly for the full report.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: StudyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Run the default validation rules, failing on the first error-severity diagnostic.
    pub fn validate(&self) -> Result<()> {
        let report = crate::pipeline::validation::ConfigValidator::with_defaults().validate(self);
        let result = match report.errors().next() {
            Some(err) => Err(StudyError::InvalidConfig {
                path: err.path.clone(),
                message: err.message.clone(),
            }),
            None => Ok(()),
        };
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sentence_word_count() {
        let s = Sentence::new("Paris est la capitale.", 0);
        assert_eq!(s.word_count, 4);
    }

    #[test]
    fn test_quiz_item_valid() {
        let item = QuizItem::new(
            "Which city?",
            options(&["Paris", "Lyon", "Nice", "Lille"]),
            2,
            "",
        )
        .unwrap();
        assert_eq!(item.correct_answer(), "Nice");
    }

    #[test]
    fn test_quiz_item_rejects_case_duplicates() {
        let err = QuizItem::new(
            "Which city?",
            options(&["Paris", "paris", "Nice", "Lille"]),
            0,
            "",
        );
        assert!(matches!(err, Err(StudyError::MalformedCandidate { .. })));
    }

    #[test]
    fn test_quiz_item_rejects_wrong_count() {
        assert!(QuizItem::new("Q?", options(&["a", "b", "c"]), 0, "").is_err());
        assert!(QuizItem::new("Q?", options(&["a", "b", "c", "d"]), 4, "").is_err());
        assert!(QuizItem::new("Q?", options(&["a", "b", " ", "d"]), 0, "").is_err());
    }

    #[test]
    fn test_anchor_validation() {
        let s = Sentence::new("Paris est la capitale de la France.", 0);
        assert!(QuizAnchor::new(s.clone(), "", ContextWindow::default(), 0.0, 1.0, false).is_err());
        assert!(QuizAnchor::new(s.clone(), "Paris", ContextWindow::default(), 1.5, 1.0, false).is_err());
        assert!(QuizAnchor::new(s.clone(), "Paris", ContextWindow::default(), 0.0, f64::NAN, false).is_err());

        let anchor = QuizAnchor::new(s, "Paris", ContextWindow::default(), 0.0, 0.4, true).unwrap();
        assert_eq!(anchor.keyword_lower(), "paris");
    }

    #[test]
    fn test_summary_length_labels() {
        assert_eq!(SummaryLength::from_label("short"), SummaryLength::Short);
        assert_eq!(SummaryLength::from_label(" LONG "), SummaryLength::Long);
        assert_eq!(SummaryLength::from_label("tiny"), SummaryLength::Medium);
        assert_eq!(SummaryConfig::default().ratio(SummaryLength::Short), 0.15);
    }

    #[test]
    fn test_quality_quota() {
        let cfg = QuizConfig::default();
        assert_eq!(cfg.quality_quota(1), 1);
        assert_eq!(cfg.quality_quota(5), 2);
        assert_eq!(cfg.quality_quota(20), 10);
    }

    #[test]
    fn test_config_from_json_defaults() {
        let cfg = StudyConfig::from_json(r#"{ "quiz": { "quality_floor": 0.6 } }"#).unwrap();
        assert_eq!(cfg.quiz.quality_floor, 0.6);
        assert_eq!(cfg.quiz.max_keyword_uses, 2);
        assert_eq!(cfg.summary, SummaryConfig::default());
    }

    #[test]
    fn test_config_from_json_rejects_bad_ratio() {
        let err = StudyConfig::from_json(r#"{ "summary": { "short_ratio": 0.0 } }"#);
        assert!(matches!(err, Err(StudyError::InvalidConfig { .. })));
    }

    #[test]
    fn test_config_from_json_returns_first_violation() {
        let json = r#"{ "summary": { "short_ratio": 0.0 }, "quiz": { "quality_floor": 2.0 } }"#;
        match StudyConfig::from_json(json) {
            Err(StudyError::InvalidConfig { path, .. }) => assert_eq!(path, "/summary/short_ratio"),
            other => panic!("expected invalid config, got {other:?}"),
        }

        let config: StudyConfig = serde_json::from_str(json).unwrap();
        let report = crate::pipeline::ConfigValidator::with_defaults().validate(&config);
        assert_eq!(report.errors().count(), 2);
    }
}
