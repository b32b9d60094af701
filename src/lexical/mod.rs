//! Lexical analysis
//!
//! Term weights, sentence centrality, keywords and string similarity. No
//! linguistic model is involved: everything is computed from token counts.

pub mod keywords;
pub mod ranking;
pub mod similarity;
pub mod unit_vector;
pub mod weights;

pub use keywords::extract_keywords;
pub use ranking::{positional_weights, rank_sentences, word_count_ranking, SentenceRanking};
pub use similarity::{edit_distance, filter_similar_terms, relative_edit_distance};
pub use unit_vector::UnitVector;
pub use weights::{build_term_weight_matrix, sentence_terms, TermWeightMatrix};
