//! Languages, activities, and embedding task types for Sophia.
//!
//! All enums use `snake_case` serialization (except [`EmbeddingTask`], which
//! follows the AI service's `SCREAMING_SNAKE_CASE` wire names). `as_str()`
//! returns the exact value stored in SQL.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Programming language of a snippet. Drives syntax highlighting downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Bash,
    C,
    Cpp,
    Csharp,
    Css,
    Dart,
    Go,
    Html,
    Java,
    Javascript,
    Json,
    Kotlin,
    Markdown,
    Php,
    #[default]
    Python,
    Ruby,
    Rust,
    Sql,
    Swift,
    Typescript,
    Yaml,
}

impl Language {
    /// Every supported language, in menu order.
    pub const ALL: [Self; 21] = [
        Self::Bash,
        Self::C,
        Self::Cpp,
        Self::Csharp,
        Self::Css,
        Self::Dart,
        Self::Go,
        Self::Html,
        Self::Java,
        Self::Javascript,
        Self::Json,
        Self::Kotlin,
        Self::Markdown,
        Self::Php,
        Self::Python,
        Self::Ruby,
        Self::Rust,
        Self::Sql,
        Self::Swift,
        Self::Typescript,
        Self::Yaml,
    ];

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Csharp => "csharp",
            Self::Css => "css",
            Self::Dart => "dart",
            Self::Go => "go",
            Self::Html => "html",
            Self::Java => "java",
            Self::Javascript => "javascript",
            Self::Json => "json",
            Self::Kotlin => "kotlin",
            Self::Markdown => "markdown",
            Self::Php => "php",
            Self::Python => "python",
            Self::Ruby => "ruby",
            Self::Rust => "rust",
            Self::Sql => "sql",
            Self::Swift => "swift",
            Self::Typescript => "typescript",
            Self::Yaml => "yaml",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bash => "Bash/Shell",
            Self::C => "C",
            Self::Cpp => "C++",
            Self::Csharp => "C#",
            Self::Css => "CSS",
            Self::Dart => "Dart",
            Self::Go => "Go",
            Self::Html => "HTML",
            Self::Java => "Java",
            Self::Javascript => "JavaScript",
            Self::Json => "JSON",
            Self::Kotlin => "Kotlin",
            Self::Markdown => "Markdown",
            Self::Php => "PHP",
            Self::Python => "Python",
            Self::Ruby => "Ruby",
            Self::Rust => "Rust",
            Self::Sql => "SQL",
            Self::Swift => "Swift",
            Self::Typescript => "TypeScript",
            Self::Yaml => "YAML",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    /// Accepts the stored name or the display label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s) || l.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown language '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Activity
// ---------------------------------------------------------------------------

/// A user action that earns points and counts towards badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    SnippetCreated,
    CollectionCreated,
    AiGeneration,
    AiExplanation,
    AiTagging,
    SnippetIndexed,
    Search,
}

impl Activity {
    pub const ALL: [Self; 7] = [
        Self::SnippetCreated,
        Self::CollectionCreated,
        Self::AiGeneration,
        Self::AiExplanation,
        Self::AiTagging,
        Self::SnippetIndexed,
        Self::Search,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SnippetCreated => "snippet_created",
            Self::CollectionCreated => "collection_created",
            Self::AiGeneration => "ai_generation",
            Self::AiExplanation => "ai_explanation",
            Self::AiTagging => "ai_tagging",
            Self::SnippetIndexed => "snippet_indexed",
            Self::Search => "search",
        }
    }

    /// Look up an activity by its stored name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EmbeddingTask
// ---------------------------------------------------------------------------

/// What an embedding will be used for.
///
/// Stored snippets are embedded as documents, search input as queries; the
/// AI service tunes the vector for each side of the retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmbeddingTask {
    RetrievalDocument,
    RetrievalQuery,
}

impl EmbeddingTask {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RetrievalDocument => "RETRIEVAL_DOCUMENT",
            Self::RetrievalQuery => "RETRIEVAL_QUERY",
        }
    }
}

impl fmt::Display for EmbeddingTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
