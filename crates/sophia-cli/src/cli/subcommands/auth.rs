use clap::{Args, Subcommand};

/// Account and session commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Create an account.
    Register(RegisterArgs),
    /// Log in and store the session token.
    Login(LoginArgs),
    /// End the session and clear stored credentials.
    Logout,
    /// Show the logged-in user.
    Whoami,
}

/// Passwords left off the command line are read from stdin.
#[derive(Clone, Debug, Args)]
pub struct RegisterArgs {
    pub username: String,
    pub email: String,
    #[arg(long)]
    pub password: Option<String>,
    /// Repeat of the password; defaults to `--password`.
    #[arg(long)]
    pub confirm: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct LoginArgs {
    pub username: String,
    #[arg(long)]
    pub password: Option<String>,
    /// Keep the session for the longer remember-me lifetime.
    #[arg(long)]
    pub remember_me: bool,
}
