//! Graph construction and representation
//!
//! This module provides the sentence similarity graph whose weighted degree
//! drives sentence centrality.

pub mod builder;
pub mod csr;

pub use builder::GraphBuilder;
pub use csr::CsrGraph;
