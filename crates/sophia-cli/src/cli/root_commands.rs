use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AiCommands, AuthCommands, BadgeCommands, CollectionCommands, SnippetCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Register, log in, and manage the stored session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Collections (nested folders for snippets).
    Collection {
        #[command(subcommand)]
        action: CollectionCommands,
    },
    /// Snippets.
    Snippet {
        #[command(subcommand)]
        action: SnippetCommands,
    },
    /// AI code generation, explanation, and tagging.
    Ai {
        #[command(subcommand)]
        action: AiCommands,
    },
    /// Search saved snippets.
    Search(SearchArgs),
    /// Embed snippets that have no stored vector yet.
    Index(IndexArgs),
    /// Points, activity counts, and badges.
    Profile(ProfileArgs),
    /// Badge definitions.
    Badge {
        #[command(subcommand)]
        action: BadgeCommands,
    },
}

/// Arguments for `sophia search`.
#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    pub query: String,
    /// Use FTS keyword search instead of embeddings.
    #[arg(long)]
    pub keyword: bool,
    /// Drop semantic matches scoring below this cosine similarity.
    #[arg(long)]
    pub min_score: Option<f32>,
}

/// Arguments for `sophia index`.
#[derive(Clone, Debug, Args)]
pub struct IndexArgs {
    /// Embed one snippet, even if it already has a vector.
    #[arg(long)]
    pub snippet: Option<String>,
}

/// Arguments for `sophia profile`.
#[derive(Clone, Debug, Args)]
pub struct ProfileArgs {
    /// How many recent activity entries to include.
    #[arg(long, default_value_t = 10)]
    pub activity: u32,
}
