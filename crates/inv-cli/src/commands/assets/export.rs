//! `inva assets export`: download the spreadsheet export.

use serde::Serialize;

use inv_core::filter::AssetFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AssetExportArgs;
use crate::commands::assets::build_filter;
use crate::commands::shared::prompt::confirm;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct ExportResponse {
    exported: bool,
    file: String,
    bytes: usize,
}

/// Handle the `export` subcommand.
///
/// # Errors
///
/// Returns an error when no session is active, the request fails, or the
/// file cannot be written.
pub async fn run(
    args: &AssetExportArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = build_filter(&args.filter)?;
    download(&filter, args.output.as_deref(), args.yes, ctx, flags).await
}

/// Export the inventory matching `filter` to a spreadsheet file, shared by
/// the one-shot command and the interactive browser.
///
/// # Errors
///
/// Returns an error when no session is active, an export is already in
/// flight, the request fails, or the file cannot be written.
pub(crate) async fn download(
    filter: &AssetFilter,
    out_path: Option<&str>,
    assume_yes: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let scope = if filter.has_active() {
        "the filtered inventory"
    } else {
        "the full inventory"
    };
    if !confirm(&format!("Export {scope} to a spreadsheet?"), assume_yes)? {
        return output(
            &ExportResponse {
                exported: false,
                file: String::new(),
                bytes: 0,
            },
            flags.format,
        );
    }

    let spinner = Progress::spinner("exporting inventory");
    let result = ctx.service.export_assets(filter).await;
    spinner.finish_clear();
    let Some(file) = result? else {
        anyhow::bail!("an export is already in flight");
    };

    let path = out_path.map_or(file.filename, str::to_owned);
    std::fs::write(&path, &file.bytes)
        .map_err(|error| anyhow::anyhow!("failed to write {path}: {error}"))?;

    tracing::debug!(file = %path, bytes = file.bytes.len(), "export written");

    output(
        &ExportResponse {
            exported: true,
            file: path,
            bytes: file.bytes.len(),
        },
        flags.format,
    )
}
