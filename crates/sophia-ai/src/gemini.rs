//! Gemini REST client.
//!
//! Talks to the `generateContent` and `embedContent` endpoints of the
//! generative-language API. The API key travels as the `key` query
//! parameter.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sophia_config::GeminiConfig;
use sophia_core::enums::EmbeddingTask;

use crate::error::AiError;
use crate::http::check_response;
use crate::{Embedder, TextGenerator, prompts};

const USER_AGENT: &str = concat!("sophia/", env!("CARGO_PKG_VERSION"));

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

impl<'a> Content<'a> {
    const fn text(text: &'a str) -> Self {
        Self {
            parts: [Part { text }],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedRequest<'a> {
    model: String,
    content: Content<'a>,
    task_type: EmbeddingTask,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Option<EmbeddingValues>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    #[serde(default)]
    values: Vec<f32>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Result<String, AiError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(AiError::InvalidResponse(format!("prompt blocked: {reason}")));
        }
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AiError::InvalidResponse("no candidates in response".to_string()))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = candidate.finish_reason.unwrap_or_else(|| "UNKNOWN".to_string());
            return Err(AiError::InvalidResponse(format!(
                "candidate has no text (finish reason: {reason})"
            )));
        }
        Ok(text)
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the Gemini generative-language API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    generation_model: String,
    embedding_model: String,
    generation: GenerationConfig,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("generation_model", &self.generation_model)
            .field("embedding_model", &self.embedding_model)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::NotConfigured`] when no API key is set, or
    /// [`AiError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &GeminiConfig) -> Result<Self, AiError> {
        if !config.is_configured() {
            return Err(AiError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            generation_model: config.generation_model.clone(),
            embedding_model: config.embedding_model.clone(),
            generation: GenerationConfig {
                temperature: config.temperature,
                top_p: config.top_p,
                top_k: config.top_k,
                max_output_tokens: config.max_output_tokens,
            },
        })
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{model}:{method}?key={}",
            self.base_url,
            urlencoding::encode(&self.api_key)
        )
    }

    async fn generate(
        &self,
        prompt: &str,
        generation_config: Option<GenerationConfig>,
    ) -> Result<String, AiError> {
        tracing::debug!(model = %self.generation_model, "gemini generateContent");
        let body = GenerateRequest {
            contents: [Content::text(prompt)],
            generation_config,
        };
        let resp = self
            .http
            .post(self.endpoint(&self.generation_model, "generateContent"))
            .json(&body)
            .send()
            .await?;
        let data: GenerateResponse = check_response(resp).await?.json().await?;
        data.into_text()
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_code(&self, prompt: &str) -> Result<String, AiError> {
        let text = self
            .generate(&prompts::code_generation(prompt), Some(self.generation))
            .await?;
        Ok(prompts::strip_code_fence(&text))
    }

    async fn explain_code(&self, code: &str) -> Result<String, AiError> {
        let text = self.generate(&prompts::code_explanation(code), None).await?;
        Ok(text.trim().to_string())
    }

    async fn suggest_tags(&self, code: &str) -> Result<Vec<String>, AiError> {
        let text = self.generate(&prompts::tag_suggestion(code), None).await?;
        let tags = prompts::parse_tags(&text);
        if tags.is_empty() {
            return Err(AiError::InvalidResponse("no tags in response".to_string()));
        }
        Ok(tags)
    }
}

#[async_trait]
impl Embedder for GeminiClient {
    fn model(&self) -> &str {
        &self.embedding_model
    }

    async fn embed(&self, text: &str, task: EmbeddingTask) -> Result<Vec<f32>, AiError> {
        tracing::debug!(model = %self.embedding_model, %task, "gemini embedContent");
        let body = EmbedRequest {
            model: format!("models/{}", self.embedding_model),
            content: Content::text(text),
            task_type: task,
        };
        let resp = self
            .http
            .post(self.endpoint(&self.embedding_model, "embedContent"))
            .json(&body)
            .send()
            .await?;
        let data: EmbedResponse = check_response(resp).await?.json().await?;
        let values = data.embedding.map(|e| e.values).unwrap_or_default();
        if values.is_empty() {
            return Err(AiError::InvalidResponse(
                "no embedding values in response".to_string(),
            ));
        }
        Ok(values)
    }
}
