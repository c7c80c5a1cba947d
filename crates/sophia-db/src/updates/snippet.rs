//! Snippet update builder.

use serde::Serialize;
use sophia_core::enums::Language;

/// Fields to change on a snippet. `None` leaves a field untouched.
///
/// `description: Some("")` clears the description. `tags` is the raw
/// comma-separated form and is normalised on save.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SnippetUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl SnippetUpdate {
    /// Whether this update changes text that the embedding was computed from.
    #[must_use]
    pub const fn touches_embedded_text(&self) -> bool {
        self.title.is_some() || self.code.is_some() || self.description.is_some()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.code.is_none()
            && self.description.is_none()
            && self.language.is_none()
            && self.tags.is_none()
    }
}

#[derive(Default)]
pub struct SnippetUpdateBuilder(SnippetUpdate);

impl SnippetUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, val: impl Into<String>) -> Self {
        self.0.title = Some(val.into());
        self
    }

    #[must_use]
    pub fn code(mut self, val: impl Into<String>) -> Self {
        self.0.code = Some(val.into());
        self
    }

    #[must_use]
    pub fn description(mut self, val: impl Into<String>) -> Self {
        self.0.description = Some(val.into());
        self
    }

    #[must_use]
    pub const fn language(mut self, val: Language) -> Self {
        self.0.language = Some(val);
        self
    }

    #[must_use]
    pub fn tags(mut self, val: impl Into<String>) -> Self {
        self.0.tags = Some(val.into());
        self
    }

    #[must_use]
    pub fn build(self) -> SnippetUpdate {
        self.0
    }
}
