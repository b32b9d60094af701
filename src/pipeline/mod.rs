//! Generator strategies and configuration validation.

pub mod runner;
pub mod validation;

pub use runner::{
    compare_summaries, Generator, LexicalGenerator, StudyGenerator, SummaryComparison,
    SummaryReport,
};
pub use validation::{
    ConfigIssue, ConfigRule, ConfigValidator, IssueCode, Severity, ValidationDiagnostic,
    ValidationReport,
};
