//! Question and explanation text

use crate::cleanup::truncate_chars;
use crate::types::QuizAnchor;
use regex::{NoExpand, Regex};

/// Placeholder for the hidden term
pub const BLANK: &str = "______";

/// Characters of the source sentence quoted in explanations
pub const EXCERPT_CHARS: usize = 140;

/// Shape of the question built for an anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Context on both sides of the blank
    Cloze,
    /// Named-entity anchor without two-sided context
    Entity,
    /// Whole sentence with the term blanked
    Completion,
}

impl PromptKind {
    pub fn for_anchor(anchor: &QuizAnchor) -> Self {
        if anchor.context().is_two_sided() {
            PromptKind::Cloze
        } else if anchor.is_entity() {
            PromptKind::Entity
        } else {
            PromptKind::Completion
        }
    }
}

/// Replace the first whole-word occurrence of `keyword` with [`BLANK`]
pub fn blank_first_occurrence(sentence: &str, keyword: &str) -> String {
    match Regex::new(&format!(r"\b{}\b", regex::escape(keyword))) {
        Ok(re) => re.replacen(sentence, 1, NoExpand(BLANK)).into_owned(),
        Err(_) => sentence.to_string(),
    }
}

/// Question text for an anchor
pub fn build_question(anchor: &QuizAnchor) -> String {
    match PromptKind::for_anchor(anchor) {
        PromptKind::Cloze => {
            let ctx = anchor.context();
            format!(
                "In the passage: « ...{} {BLANK} {}... », which term completes it?",
                ctx.before, ctx.after
            )
        }
        PromptKind::Entity => format!(
            "Which element is mentioned in this sentence: « {} »?",
            blank_first_occurrence(&anchor.sentence().text, anchor.keyword())
        ),
        PromptKind::Completion => format!(
            "Complete the following sentence: « {} »",
            blank_first_occurrence(&anchor.sentence().text, anchor.keyword())
        ),
    }
}

/// Explanation shown with the answer: the answer itself, an entity note
/// and an excerpt of the source sentence.
pub fn build_explanation(anchor: &QuizAnchor, correct: &str) -> String {
    let mut details = vec![format!("The correct answer is « {correct} ».")];
    if anchor.is_entity() {
        details.push("This term is identified as a key entity of the text.".to_string());
    }

    let sentence = &anchor.sentence().text;
    let excerpt = truncate_chars(sentence, EXCERPT_CHARS);
    let ellipsis = if excerpt.len() < sentence.len() { "..." } else { "" };
    details.push(format!("Excerpt: « {excerpt}{ellipsis} »"));
    details.join(" ")
}
