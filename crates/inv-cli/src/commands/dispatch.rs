//! Route a parsed command to its handler.

use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

/// Dispatch `command` to its handler. `schema` never reaches here; `main`
/// handles it before configuration is loaded.
///
/// # Errors
///
/// Propagates whatever the handler fails with.
pub async fn dispatch(
    command: &Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Login(args) => commands::login::handle(args, ctx, flags).await,
        Commands::Logout => commands::logout::handle(ctx, flags),
        Commands::Status => commands::status::handle(ctx, flags),
        Commands::Dashboard => commands::dashboard::handle(ctx, flags).await,
        Commands::Assets { action } => commands::assets::handle(action, ctx, flags).await,
        Commands::Locations { action } => commands::locations::handle(action, ctx, flags).await,
        Commands::Types { action } => commands::types::handle(action, ctx, flags).await,
        Commands::Users { action } => commands::users::handle(action, ctx, flags).await,
        Commands::Changelog { action } => commands::changelog::handle(action, ctx, flags).await,
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
