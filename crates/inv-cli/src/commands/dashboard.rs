//! `inva dashboard`.

use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::session::require_fetched;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct DashboardResponse {
    total_assets: u32,
    active: u32,
    inactive: u32,
    total_value: f64,
}

/// Show the inventory totals the dashboard cards are built from. The total
/// counts active plus inactive; decommissioned assets stay out of it.
///
/// # Errors
///
/// Returns an error when no session is active or the request fails.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let spinner = Progress::spinner("loading inventory stats");
    let result = ctx.service.fetch_stats().await;
    spinner.finish_clear();
    let stats = require_fetched(result?)?;

    output(
        &DashboardResponse {
            total_assets: stats.active + stats.inactive,
            active: stats.active,
            inactive: stats.inactive,
            total_value: stats.cost,
        },
        flags.format,
    )
}
