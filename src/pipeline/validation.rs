//! Validation engine for [`StudyConfig`].
//!
//! The validator runs every registered [`ConfigRule`] and collects all
//! diagnostics into a [`ValidationReport`]. It never stops at the first
//! error, so a bad configuration file reports all of its problems at once.
//!
//! ```rust,ignore
//! use lexistudy::pipeline::validation::ConfigValidator;
//!
//! let report = ConfigValidator::with_defaults().validate(&config);
//! for err in report.errors() {
//!     eprintln!("{err}");
//! }
//! ```

use crate::types::StudyConfig;
use serde::Serialize;
use std::fmt;

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Issue ──────────────────────────────────────────────────────────────────

/// Machine-readable category of a configuration issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    OutOfRange,
    NotPositive,
    Unordered,
}

/// A problem found at one configuration path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigIssue {
    pub code: IssueCode,
    /// JSON pointer to the offending field, e.g. `/summary/short_ratio`
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ConfigIssue {
    pub fn new(code: IssueCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({hint})")?;
        }
        Ok(())
    }
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding with its severity
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub issue: ConfigIssue,
}

impl ValidationDiagnostic {
    pub fn error(issue: ConfigIssue) -> Self {
        Self {
            severity: Severity::Error,
            issue,
        }
    }

    pub fn warning(issue: ConfigIssue) -> Self {
        Self {
            severity: Severity::Warning,
            issue,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.by_severity(Severity::Error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.by_severity(Severity::Warning)
    }

    fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &ConfigIssue> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
            .map(|d| &d.issue)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`StudyConfig`] and returns
/// zero or more diagnostics.
pub trait ConfigRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"summary_ratios"`).
    fn name(&self) -> &str;

    fn validate(&self, config: &StudyConfig) -> Vec<ValidationDiagnostic>;
}

// ─── Validator ──────────────────────────────────────────────────────────────

/// Runs a set of [`ConfigRule`]s and collects all diagnostics.
pub struct ConfigValidator {
    rules: Vec<Box<dyn ConfigRule>>,
}

impl ConfigValidator {
    /// Create an empty validator with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a validator pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut validator = Self::new();
        validator.add_rule(Box::new(SummaryRatiosRule));
        validator.add_rule(Box::new(RatioOrderRule));
        validator.add_rule(Box::new(QuizThresholdsRule));
        validator.add_rule(Box::new(PositiveLimitsRule));
        validator.add_rule(Box::new(PositionFloorRule));
        validator
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ConfigRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in run order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run all rules against `config` and return the collected report.
    pub fn validate(&self, config: &StudyConfig) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(config));
        }
        report
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Error diagnostic for a fraction outside `[0, 1]`, or `(0, 1]` when
/// `exclusive_zero` is set
fn check_fraction(path: &str, value: f64, exclusive_zero: bool) -> Option<ValidationDiagnostic> {
    let in_range = if exclusive_zero {
        value > 0.0 && value <= 1.0
    } else {
        (0.0..=1.0).contains(&value)
    };
    if in_range {
        return None;
    }
    let range = if exclusive_zero { "(0, 1]" } else { "[0, 1]" };
    Some(ValidationDiagnostic::error(ConfigIssue::new(
        IssueCode::OutOfRange,
        path,
        format!("{value} is outside {range}"),
    )))
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. Summary keep ratios in (0, 1] ───────────────────────────────────────

struct SummaryRatiosRule;

impl ConfigRule for SummaryRatiosRule {
    fn name(&self) -> &str {
        "summary_ratios"
    }

    fn validate(&self, config: &StudyConfig) -> Vec<ValidationDiagnostic> {
        let s = &config.summary;
        [
            ("/summary/short_ratio", s.short_ratio),
            ("/summary/medium_ratio", s.medium_ratio),
            ("/summary/long_ratio", s.long_ratio),
        ]
        .into_iter()
        .filter_map(|(path, value)| check_fraction(path, value, true))
        .collect()
    }
}

// ─── 2. Ratios should grow with the requested length ───────────────────────

struct RatioOrderRule;

impl ConfigRule for RatioOrderRule {
    fn name(&self) -> &str {
        "ratio_order"
    }

    fn validate(&self, config: &StudyConfig) -> Vec<ValidationDiagnostic> {
        let s = &config.summary;
        if s.short_ratio <= s.medium_ratio && s.medium_ratio <= s.long_ratio {
            return vec![];
        }
        vec![ValidationDiagnostic::warning(
            ConfigIssue::new(
                IssueCode::Unordered,
                "/summary",
                format!(
                    "ratios are not increasing: short {}, medium {}, long {}",
                    s.short_ratio, s.medium_ratio, s.long_ratio
                ),
            )
            .with_hint("A longer summary normally keeps a larger share of sentences"),
        )]
    }
}

// ─── 3. Quality floor and quota fraction in [0, 1] ─────────────────────────

struct QuizThresholdsRule;

impl ConfigRule for QuizThresholdsRule {
    fn name(&self) -> &str {
        "quiz_thresholds"
    }

    fn validate(&self, config: &StudyConfig) -> Vec<ValidationDiagnostic> {
        [
            ("/quiz/quality_floor", config.quiz.quality_floor),
            ("/quiz/quota_fraction", config.quiz.quota_fraction),
        ]
        .into_iter()
        .filter_map(|(path, value)| check_fraction(path, value, false))
        .collect()
    }
}

// ─── 4. Windows and limits must be positive ────────────────────────────────

struct PositiveLimitsRule;

impl ConfigRule for PositiveLimitsRule {
    fn name(&self) -> &str {
        "positive_limits"
    }

    fn validate(&self, config: &StudyConfig) -> Vec<ValidationDiagnostic> {
        let checks: &[(&str, usize)] = &[
            ("/analyzer/summary_min_words", config.analyzer.summary_min_words),
            ("/analyzer/quiz_min_words", config.analyzer.quiz_min_words),
            ("/analyzer/context_window", config.analyzer.context_window),
            ("/analyzer/max_keywords", config.analyzer.max_keywords),
            ("/summary/fallback_prefix_chars", config.summary.fallback_prefix_chars),
            ("/quiz/max_keyword_uses", config.quiz.max_keyword_uses),
            ("/quiz/max_distractors", config.quiz.max_distractors),
            ("/boilerplate/scan_lines", config.boilerplate.scan_lines),
            ("/boilerplate/min_indicators", config.boilerplate.min_indicators),
            ("/boilerplate/repeat_min_count", config.boilerplate.repeat_min_count),
        ];

        checks
            .iter()
            .filter(|(_, value)| *value == 0)
            .map(|&(path, _)| {
                ValidationDiagnostic::error(ConfigIssue::new(
                    IssueCode::NotPositive,
                    path,
                    "must be greater than 0",
                ))
            })
            .collect()
    }
}

// ─── 5. Positional floor in [0, 1] ─────────────────────────────────────────

struct PositionFloorRule;

impl ConfigRule for PositionFloorRule {
    fn name(&self) -> &str {
        "position_floor"
    }

    fn validate(&self, config: &StudyConfig) -> Vec<ValidationDiagnostic> {
        check_fraction("/analyzer/position_floor", config.analyzer.position_floor, false)
            .map(|d| {
                ValidationDiagnostic::error(
                    d.issue
                        .with_hint("1.0 disables positional decay; 0.0 ignores the last sentence"),
                )
            })
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{QuizConfig, SummaryConfig};

    fn validator() -> ConfigValidator {
        ConfigValidator::with_defaults()
    }

    #[test]
    fn test_default_config_is_clean() {
        let report = validator().validate(&StudyConfig::default());
        assert!(report.is_valid());
        assert!(report.is_empty());
    }

    #[test]
    fn test_zero_ratio_is_error() {
        let config = StudyConfig {
            summary: SummaryConfig {
                short_ratio: 0.0,
                ..SummaryConfig::default()
            },
            ..StudyConfig::default()
        };
        let report = validator().validate(&config);
        let err = report.errors().next().unwrap();
        assert_eq!(err.path, "/summary/short_ratio");
        assert_eq!(err.code, IssueCode::OutOfRange);
    }

    #[test]
    fn test_all_problems_reported() {
        let mut config = StudyConfig::default();
        config.summary.long_ratio = 1.5;
        config.quiz.quality_floor = -0.1;
        config.analyzer.context_window = 0;
        config.analyzer.position_floor = 2.0;

        let report = validator().validate(&config);
        let paths: Vec<&str> = report.errors().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/summary/long_ratio",
                "/quiz/quality_floor",
                "/analyzer/context_window",
                "/analyzer/position_floor",
            ]
        );
        assert!(report.errors().last().unwrap().hint.is_some());
    }

    #[test]
    fn test_unordered_ratios_warn() {
        let config = StudyConfig {
            summary: SummaryConfig {
                short_ratio: 0.6,
                ..SummaryConfig::default()
            },
            ..StudyConfig::default()
        };
        let report = validator().validate(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(report.warnings().next().unwrap().code, IssueCode::Unordered);
    }

    #[test]
    fn test_boundary_values_accepted() {
        let config = StudyConfig {
            quiz: QuizConfig {
                quality_floor: 0.0,
                quota_fraction: 1.0,
                ..QuizConfig::default()
            },
            ..StudyConfig::default()
        };
        assert!(validator().validate(&config).is_valid());
    }

    #[test]
    fn test_custom_rule() {
        struct NoLongSummaries;
        impl ConfigRule for NoLongSummaries {
            fn name(&self) -> &str {
                "no_long_summaries"
            }
            fn validate(&self, config: &StudyConfig) -> Vec<ValidationDiagnostic> {
                if config.summary.long_ratio > 0.4 {
                    vec![ValidationDiagnostic::error(ConfigIssue::new(
                        IssueCode::OutOfRange,
                        "/summary/long_ratio",
                        "long summaries are disabled",
                    ))]
                } else {
                    vec![]
                }
            }
        }

        let mut validator = ConfigValidator::new();
        validator.add_rule(Box::new(NoLongSummaries));
        assert_eq!(validator.rule_names(), vec!["no_long_summaries"]);
        assert!(validator.validate(&StudyConfig::default()).has_errors());
    }

    #[test]
    fn test_report_serializes() {
        let mut config = StudyConfig::default();
        config.quiz.max_distractors = 0;
        let report = validator().validate(&config);
        let json = serde_json::to_value(&report).unwrap();

        let first = &json["diagnostics"][0];
        assert_eq!(first["severity"], "error");
        assert_eq!(first["code"], "not_positive");
        assert_eq!(first["path"], "/quiz/max_distractors");
        assert!(first.get("hint").is_none());
    }
}
