//! # sophia-search
//!
//! Snippet search for Sophia.
//!
//! - [`vector`]: packing vectors into blobs, cosine similarity, and the
//!   linear-scan ranking over every stored vector
//! - [`index`]: embedding snippets and storing their vectors
//! - [`semantic`]: query-embedding search and "more like this"
//! - [`fts`]: FTS5 keyword search for when no embedder is available

pub mod error;
pub mod fts;
pub mod index;
pub mod semantic;
pub mod vector;

#[cfg(test)]
mod test_support;

pub use error::SearchError;
pub use fts::keyword_search;
pub use index::{
    IndexFailure, IndexProgress, ReindexSummary, index_snippet, reindex_missing,
    reindex_missing_with,
};
pub use semantic::{ANY_SCORE, semantic_search, similar_snippets};
