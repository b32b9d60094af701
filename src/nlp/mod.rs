//! Natural Language Processing components
//!
//! This module provides sentence splitting, tokenization and stopword filtering.

pub mod stopwords;
pub mod tokenizer;

pub use stopwords::StopwordFilter;
pub use tokenizer::{
    find_named_entities, restore_original_token, slice_context, split_sentences, word_tokens,
};
