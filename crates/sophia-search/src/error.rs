//! Search error types for sophia-search.

use sophia_ai::AiError;
use sophia_db::DatabaseError;

/// Errors from indexing and search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Invalid or empty search query.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Two vectors of different length were compared.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    Dimension { expected: usize, actual: usize },

    /// A stored blob is not a packed `f32` array.
    #[error("cannot decode embedding: {0}")]
    Decode(String),

    /// The snippet has no stored embedding yet.
    #[error("snippet {0} has no embedding, run `sophia index`")]
    NotIndexed(String),

    /// Error from the libSQL database.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// Error from the embedding service.
    #[error("embedding error: {0}")]
    Ai(#[from] AiError),
}
