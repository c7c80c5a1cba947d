use serde::Serialize;
use sophia_core::entities::ScoredSnippet;
use sophia_core::enums::Language;

/// One search or similarity result, flattened for display.
#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub score: f32,
    pub id: String,
    pub title: String,
    pub language: Language,
    pub tags: Vec<String>,
    pub collection_id: Option<String>,
}

impl From<ScoredSnippet> for SearchHit {
    fn from(scored: ScoredSnippet) -> Self {
        let ScoredSnippet { snippet, score } = scored;
        Self {
            score,
            id: snippet.id,
            title: snippet.title,
            language: snippet.language,
            tags: snippet.tags,
            collection_id: snippet.collection_id,
        }
    }
}

#[must_use]
pub fn hits(results: Vec<ScoredSnippet>) -> Vec<SearchHit> {
    results.into_iter().map(SearchHit::from).collect()
}
