//! `inva assets delete`.

use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::prompt::confirm;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct AssetDeleteResponse {
    deleted: bool,
    message: String,
}

/// Delete an asset after confirmation. Admin only.
///
/// # Errors
///
/// Returns an error when the role does not allow deletion or the request
/// fails.
pub async fn run(id: i64, yes: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !confirm(&format!("Delete asset {id}? This cannot be undone."), yes)? {
        return output(
            &AssetDeleteResponse {
                deleted: false,
                message: "delete cancelled".to_owned(),
            },
            flags.format,
        );
    }

    let spinner = Progress::spinner("deleting asset");
    let result = ctx.service.delete_asset(id).await;
    spinner.finish_clear();
    let message = result?;

    output(
        &AssetDeleteResponse {
            deleted: true,
            message,
        },
        flags.format,
    )
}
