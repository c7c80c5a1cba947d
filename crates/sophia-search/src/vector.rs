//! Vector codec and brute-force cosine ranking.
//!
//! Embeddings are stored as packed little-endian `f32` blobs. Ranking is a
//! linear scan: every candidate is decoded and scored against the query, then
//! the best `limit` are kept.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

const F32_BYTES: usize = std::mem::size_of::<f32>();

/// One scored candidate from [`rank`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedId {
    pub id: String,
    pub score: f32,
}

/// Pack a vector as little-endian `f32` bytes.
#[must_use]
pub fn encode(vector: &[f32]) -> Vec<u8> {
    vector.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Unpack a blob written by [`encode`].
///
/// # Errors
///
/// Returns [`SearchError::Decode`] if the length is not a multiple of four.
pub fn decode(blob: &[u8]) -> Result<Vec<f32>, SearchError> {
    if blob.len() % F32_BYTES != 0 {
        return Err(SearchError::Decode(format!(
            "blob length {} is not a multiple of {F32_BYTES}",
            blob.len()
        )));
    }
    Ok(blob
        .chunks_exact(F32_BYTES)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Cosine similarity in `[-1, 1]`. A zero vector scores `0.0` against
/// anything.
///
/// # Errors
///
/// Returns [`SearchError::Dimension`] if the vectors differ in length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, SearchError> {
    if a.len() != b.len() {
        return Err(SearchError::Dimension {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    #[allow(clippy::cast_possible_truncation)]
    let score = (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0) as f32;
    Ok(score)
}

/// Score every candidate against `query` and keep the best `limit`.
///
/// Candidates scoring below `min_score` are dropped. Blobs that fail to
/// decode or have the wrong dimension are skipped with a warning. Results
/// are ordered by score descending, then by id.
pub fn rank<I>(query: &[f32], candidates: I, limit: usize, min_score: f32) -> Vec<RankedId>
where
    I: IntoIterator<Item = (String, Vec<u8>)>,
{
    let mut ranked: Vec<RankedId> = candidates
        .into_iter()
        .filter_map(|(id, blob)| {
            let score = decode(&blob).and_then(|vector| cosine_similarity(query, &vector));
            match score {
                Ok(score) if score.is_nan() => None,
                Ok(score) => Some(RankedId { id, score }),
                Err(error) => {
                    tracing::warn!(snippet_id = %id, %error, "skipping stored embedding");
                    None
                }
            }
        })
        .filter(|r| r.score >= min_score)
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
    ranked.truncate(limit);
    ranked
}
