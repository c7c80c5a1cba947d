use clap::Subcommand;

/// Collection commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CollectionCommands {
    /// Create a collection.
    Create {
        name: String,
        #[arg(long)]
        parent: Option<String>,
    },
    /// Rename a collection.
    Rename { id: String, name: String },
    /// Move a collection under another one, or to the top level.
    Move {
        id: String,
        #[arg(long = "to", conflicts_with = "root", required_unless_present = "root")]
        parent: Option<String>,
        #[arg(long)]
        root: bool,
    },
    /// Delete a collection. Children move up and snippets are kept.
    Delete { id: String },
    /// List collections as a flat list.
    List,
    /// Show the collection hierarchy with snippet counts.
    Tree,
    /// Get a collection with its path from the top level.
    Get { id: String },
}
