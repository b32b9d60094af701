//! Document cleanup
//!
//! Normalization of raw text and removal of layout boilerplate left over
//! from document extraction.

pub mod boilerplate;
pub mod normalize;

pub use boilerplate::remove_boilerplate;
pub use normalize::{clean_inline, clean_text, truncate_chars};

use crate::types::BoilerplateConfig;

/// Normalize raw text and strip boilerplate in one step
pub fn prepare_document(raw_text: &str, config: &BoilerplateConfig) -> String {
    let cleaned = {
        trace_stage!("normalize");
        clean_text(raw_text)
    };
    trace_stage!("boilerplate");
    remove_boilerplate(&cleaned, config)
}
