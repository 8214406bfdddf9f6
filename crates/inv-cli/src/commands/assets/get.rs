//! `inva assets get`.

use serde::Serialize;

use inv_core::enums::AssetStatus;

use crate::cli::GlobalFlags;
use crate::commands::assets::{location_name, responsible_name, type_name};
use crate::commands::shared::session::require_fetched;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct AssetGetResponse {
    id: i64,
    name: String,
    serial_number: i64,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    location: String,
    responsible: String,
    status: AssetStatus,
    cost: f64,
    acquisition_date: String,
    history_entries: usize,
}

/// Fetch one asset and print it with its embeds joined down to names.
///
/// # Errors
///
/// Returns an error when no session is active, the asset does not exist,
/// or the request fails.
pub async fn run(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let spinner = Progress::spinner("loading asset");
    let result = ctx.service.asset_detail(id).await;
    spinner.finish_clear();
    let detail = require_fetched(result?)?;

    let Some(asset) = detail.asset else {
        anyhow::bail!("asset {id} not found");
    };

    output(
        &AssetGetResponse {
            id: asset.id,
            name: asset.name.clone(),
            serial_number: asset.serial_number,
            type_name: type_name(&asset),
            description: asset.description.clone(),
            location: location_name(&asset),
            responsible: responsible_name(&asset),
            status: asset.status,
            cost: asset.cost,
            acquisition_date: asset.acquisition_date.to_rfc3339(),
            history_entries: detail.changelog.len(),
        },
        flags.format,
    )
}
