use sophia_core::entities::User;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command for the logged-in user.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    user: &User,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Collection { action } => commands::collection::handle(&action, ctx, user, flags).await,
        Commands::Snippet { action } => commands::snippet::handle(&action, ctx, user, flags).await,
        Commands::Ai { action } => commands::ai::handle(&action, ctx, user, flags).await,
        Commands::Search(args) => commands::search::handle(&args, ctx, user, flags).await,
        Commands::Index(args) => commands::index::handle(&args, ctx, user, flags).await,
        Commands::Profile(args) => commands::profile::handle(&args, ctx, user, flags).await,
        Commands::Badge { action } => commands::badge::handle(&action, ctx, user, flags).await,
        Commands::Auth { .. } => unreachable!("auth is pre-dispatched in main"),
    }
}
