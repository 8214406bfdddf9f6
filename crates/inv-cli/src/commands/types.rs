//! `inva types` handlers.

use serde::Serialize;

use inv_api::resource::TypeDraft;
use inv_core::entities::AssetType;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TypeCommands;
use crate::commands::shared::prompt::confirm;
use crate::commands::shared::session::require_fetched;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct TypeMutationResponse {
    message: String,
    asset_type: AssetType,
}

#[derive(Serialize)]
struct TypeDeleteResponse {
    deleted: bool,
    message: String,
}

/// Route an `inva types` action.
///
/// # Errors
///
/// Propagates whatever the action fails with.
pub async fn handle(
    action: &TypeCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TypeCommands::List => list(ctx, flags).await,
        TypeCommands::Create {
            name,
            category,
            description,
        } => {
            let draft = TypeDraft {
                name: name.clone(),
                category: category.clone(),
                description: description.clone(),
            };
            create(&draft, ctx, flags).await
        }
        TypeCommands::Update {
            id,
            name,
            category,
            description,
        } => {
            let draft = TypeDraft {
                name: name.clone(),
                category: category.clone(),
                description: description.clone(),
            };
            update(*id, &draft, ctx, flags).await
        }
        TypeCommands::Delete { id, yes } => delete(*id, *yes, ctx, flags).await,
    }
}

async fn list(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let spinner = Progress::spinner("loading asset types");
    let result = ctx.service.fetch_types().await;
    spinner.finish_clear();
    let types = require_fetched(result?)?;
    output(&types, flags.format)
}

async fn create(draft: &TypeDraft, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let spinner = Progress::spinner("creating asset type");
    let result = ctx.service.create_type(draft).await;
    spinner.finish_clear();
    let mutation = result?;
    output(
        &TypeMutationResponse {
            message: mutation.message,
            asset_type: mutation.record,
        },
        flags.format,
    )
}

async fn update(
    id: i64,
    draft: &TypeDraft,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let spinner = Progress::spinner("updating asset type");
    let result = ctx.service.update_type(id, draft).await;
    spinner.finish_clear();
    let mutation = result?;
    output(
        &TypeMutationResponse {
            message: mutation.message,
            asset_type: mutation.record,
        },
        flags.format,
    )
}

async fn delete(id: i64, yes: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !confirm(&format!("Delete asset type {id}?"), yes)? {
        return output(
            &TypeDeleteResponse {
                deleted: false,
                message: "delete cancelled".to_owned(),
            },
            flags.format,
        );
    }

    let spinner = Progress::spinner("deleting asset type");
    let result = ctx.service.delete_type(id).await;
    spinner.finish_clear();
    let message = result?;
    output(
        &TypeDeleteResponse {
            deleted: true,
            message,
        },
        flags.format,
    )
}
