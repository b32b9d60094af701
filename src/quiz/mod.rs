//! Multiple-choice quiz generation
//!
//! Anchors (sentence + keyword pairs) are mined from the text, turned into
//! prompts with lexically similar distractors, scored and validated into
//! [`QuizItem`](crate::types::QuizItem)s.

pub mod anchors;
pub mod assembler;
pub mod distractors;
pub mod prompts;

pub use anchors::{extract_key_information, KeyInformation};
pub use assembler::{
    assemble_options, assemble_quiz, generate_quiz, generate_quiz_with_rng, QuizCandidate,
};
pub use distractors::{context_terms, generate_distractors, match_case, score_question_quality};
pub use prompts::{blank_first_occurrence, build_explanation, build_question, PromptKind};
