//! `inva assets create`.

use serde::Serialize;

use inv_api::assets::AssetDraft;
use inv_core::entities::Asset;
use inv_core::enums::AssetStatus;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AssetCreateArgs;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct AssetCreateResponse {
    message: String,
    asset: Asset,
}

/// Register a new asset. The acquisition date is stamped client-side at
/// submit time, matching what the server expects.
///
/// # Errors
///
/// Returns an error when the session or role does not allow creation, a
/// flag is invalid, or the server rejects the draft.
pub async fn run(
    args: &AssetCreateArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let status = parse_enum::<AssetStatus>(&args.status, "status")?;
    let draft = AssetDraft {
        name: args.name.clone(),
        serial_number: args.serial_number,
        type_id: args.type_id,
        description: args.description.clone(),
        responsible_id: args.responsible_id,
        location_id: args.location_id,
        status,
        cost: args.cost,
    };

    let spinner = Progress::spinner("creating asset");
    let result = ctx.service.create_asset(draft).await;
    spinner.finish_clear();
    let mutation = result?;

    output(
        &AssetCreateResponse {
            message: mutation.message,
            asset: mutation.record,
        },
        flags.format,
    )
}
