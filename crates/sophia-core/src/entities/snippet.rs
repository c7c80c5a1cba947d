use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::Language;

/// A stored code fragment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snippet {
    pub id: String,
    pub user_id: String,
    pub collection_id: Option<String>,
    pub title: String,
    pub code: String,
    pub description: Option<String>,
    pub language: Language,
    pub tags: Vec<String>,
    /// Whether a vector embedding is stored for this snippet.
    pub has_embedding: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Snippet {
    /// The text sent to the embedding model for this snippet.
    ///
    /// Title, description, and code are combined so the vector captures
    /// intent as well as implementation. A missing description renders as
    /// `None`.
    #[must_use]
    pub fn embedding_text(&self) -> String {
        format!(
            "Title: {}\nDescription: {}\nCode: {}",
            self.title,
            self.description.as_deref().unwrap_or("None"),
            self.code
        )
    }
}

/// Input for creating a snippet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSnippet {
    pub title: String,
    pub code: String,
    pub description: Option<String>,
    pub language: Language,
    /// Raw comma-separated tags; normalised on save.
    pub tags: Option<String>,
    pub collection_id: Option<String>,
}

/// A snippet paired with its similarity to a query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredSnippet {
    pub snippet: Snippet,
    pub score: f32,
}
