use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Snippet commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SnippetCommands {
    /// Save a snippet.
    Create(CreateSnippetArgs),
    /// Get a snippet by ID.
    Get { id: String },
    /// List snippets, newest first.
    List(ListSnippetArgs),
    /// Update a snippet.
    Update(UpdateSnippetArgs),
    /// Delete a snippet.
    Delete { id: String },
    /// Put a snippet in a collection, or take it out.
    Move {
        id: String,
        #[arg(long = "to", conflicts_with = "none", required_unless_present = "none")]
        collection: Option<String>,
        /// Remove the snippet from its collection.
        #[arg(long)]
        none: bool,
    },
    /// Snippets whose embeddings are closest to this one.
    Similar { id: String },
}

#[derive(Clone, Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct CreateSnippetArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, conflicts_with = "code_file", required_unless_present = "code_file")]
    pub code: Option<String>,
    /// Read the code from a file (`-` for stdin).
    #[arg(long)]
    pub code_file: Option<PathBuf>,
    #[arg(long)]
    pub description: Option<String>,
    /// Language name or label, e.g. `python` or `C++`.
    #[arg(long, default_value = "python")]
    pub language: String,
    /// Comma-separated tags.
    #[arg(long)]
    pub tags: Option<String>,
    #[arg(long)]
    pub collection: Option<String>,
    /// Ask the AI for tags when `--tags` is empty.
    #[arg(long)]
    pub suggest_tags: bool,
    /// Skip embedding the snippet after saving.
    #[arg(long)]
    pub no_embed: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ListSnippetArgs {
    #[arg(long)]
    pub collection: Option<String>,
    #[arg(long)]
    pub language: Option<String>,
    #[arg(long)]
    pub tag: Option<String>,
    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    pub page: u32,
}

#[derive(Clone, Debug, Args)]
pub struct UpdateSnippetArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, conflicts_with = "code_file")]
    pub code: Option<String>,
    #[arg(long)]
    pub code_file: Option<PathBuf>,
    /// An empty value clears the description.
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub language: Option<String>,
    #[arg(long)]
    pub tags: Option<String>,
    /// Skip re-embedding after a change to the title, code, or description.
    #[arg(long)]
    pub no_embed: bool,
}
