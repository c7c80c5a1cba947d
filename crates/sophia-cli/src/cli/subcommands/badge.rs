use clap::Subcommand;

/// Badge commands.
#[derive(Clone, Debug, Subcommand)]
pub enum BadgeCommands {
    /// List every badge definition.
    List,
    /// Add or replace a badge definition.
    Define {
        slug: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// e.g. `snippet_created >= 10 && points > 50`
        #[arg(long)]
        criteria: String,
        #[arg(long)]
        icon: Option<String>,
    },
}
