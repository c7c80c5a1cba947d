//! Gemini generative-language API configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_generation_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-004".to_string()
}

const fn default_temperature() -> f32 {
    0.4
}

const fn default_top_p() -> f32 {
    1.0
}

const fn default_top_k() -> u32 {
    32
}

const fn default_max_output_tokens() -> u32 {
    4096
}

const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// API key. Also read from the legacy `GEMINI_API_KEY` variable.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for code generation, explanations, and tag suggestions.
    #[serde(default = "default_generation_model")]
    pub generation_model: String,

    /// Model used for snippet and query embeddings.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_top_k")]
    pub top_k: u32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// HTTP request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            generation_model: default_generation_model(),
            embedding_model: default_embedding_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeminiConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}
