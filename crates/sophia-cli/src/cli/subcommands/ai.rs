use std::path::PathBuf;

use clap::{Args, Subcommand};

/// AI assistant commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AiCommands {
    /// Generate code from a prompt.
    Generate(GenerateArgs),
    /// Explain code line by line.
    Explain(CodeSourceArgs),
    /// Suggest tags for code.
    Tags(CodeSourceArgs),
}

#[derive(Clone, Debug, Args)]
pub struct GenerateArgs {
    pub prompt: String,
    /// Save the generated code as a snippet.
    #[arg(long)]
    pub save: bool,
    /// Snippet title when saving; defaults to the prompt.
    #[arg(long, requires = "save")]
    pub title: Option<String>,
    #[arg(long, default_value = "python")]
    pub language: String,
    #[arg(long, requires = "save")]
    pub collection: Option<String>,
}

/// Where the code comes from: inline, a file, or a saved snippet.
#[derive(Clone, Debug, Args)]
#[group(required = true, multiple = false)]
pub struct CodeSourceArgs {
    #[arg(long)]
    pub code: Option<String>,
    #[arg(long)]
    pub code_file: Option<PathBuf>,
    #[arg(long)]
    pub snippet: Option<String>,
}
