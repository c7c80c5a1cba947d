//! # sophia-ai
//!
//! Client for the Google Gemini generative-language API.
//!
//! [`GeminiClient`] generates code from a prompt, explains code, suggests
//! tags, and produces embeddings. Callers depend on the [`TextGenerator`]
//! and [`Embedder`] traits so tests can substitute fakes.

mod error;
mod gemini;
mod http;
pub mod prompts;

pub use error::AiError;
pub use gemini::GeminiClient;

use async_trait::async_trait;
use sophia_core::enums::EmbeddingTask;

/// Text generation capabilities.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate code for a natural-language prompt. Returns raw code with
    /// any surrounding Markdown fence removed.
    async fn generate_code(&self, prompt: &str) -> Result<String, AiError>;

    /// Explain code line by line, as Markdown.
    async fn explain_code(&self, code: &str) -> Result<String, AiError>;

    /// Suggest up to five lowercase tags for code.
    async fn suggest_tags(&self, code: &str) -> Result<Vec<String>, AiError>;
}

/// Produces embedding vectors.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Name of the embedding model, stored next to each vector.
    fn model(&self) -> &str;

    async fn embed(&self, text: &str, task: EmbeddingTask) -> Result<Vec<f32>, AiError>;
}
