//! `inva locations` handlers.

use serde::Serialize;

use inv_api::resource::LocationDraft;
use inv_core::entities::Location;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LocationCommands;
use crate::commands::shared::prompt::confirm;
use crate::commands::shared::session::require_fetched;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct LocationMutationResponse {
    message: String,
    location: Location,
}

#[derive(Serialize)]
struct LocationDeleteResponse {
    deleted: bool,
    message: String,
}

/// Route an `inva locations` action.
///
/// # Errors
///
/// Propagates whatever the action fails with.
pub async fn handle(
    action: &LocationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        LocationCommands::List => list(ctx, flags).await,
        LocationCommands::Create { name, description } => {
            let draft = LocationDraft {
                name: name.clone(),
                description: description.clone(),
            };
            create(&draft, ctx, flags).await
        }
        LocationCommands::Update {
            id,
            name,
            description,
        } => {
            let draft = LocationDraft {
                name: name.clone(),
                description: description.clone(),
            };
            update(*id, &draft, ctx, flags).await
        }
        LocationCommands::Delete { id, yes } => delete(*id, *yes, ctx, flags).await,
    }
}

async fn list(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let spinner = Progress::spinner("loading locations");
    let result = ctx.service.fetch_locations().await;
    spinner.finish_clear();
    let locations = require_fetched(result?)?;
    output(&locations, flags.format)
}

async fn create(draft: &LocationDraft, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let spinner = Progress::spinner("creating location");
    let result = ctx.service.create_location(draft).await;
    spinner.finish_clear();
    let mutation = result?;
    output(
        &LocationMutationResponse {
            message: mutation.message,
            location: mutation.record,
        },
        flags.format,
    )
}

async fn update(
    id: i64,
    draft: &LocationDraft,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let spinner = Progress::spinner("updating location");
    let result = ctx.service.update_location(id, draft).await;
    spinner.finish_clear();
    let mutation = result?;
    output(
        &LocationMutationResponse {
            message: mutation.message,
            location: mutation.record,
        },
        flags.format,
    )
}

async fn delete(id: i64, yes: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !confirm(&format!("Delete location {id}?"), yes)? {
        return output(
            &LocationDeleteResponse {
                deleted: false,
                message: "delete cancelled".to_owned(),
            },
            flags.format,
        );
    }

    let spinner = Progress::spinner("deleting location");
    let result = ctx.service.delete_location(id).await;
    spinner.finish_clear();
    let message = result?;
    output(
        &LocationDeleteResponse {
            deleted: true,
            message,
        },
        flags.format,
    )
}
