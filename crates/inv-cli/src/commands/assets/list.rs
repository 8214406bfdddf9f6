//! `inva assets list`.

use serde::Serialize;

use inv_api::AssetQuery;
use inv_core::entities::{Asset, AssetPage};
use inv_core::enums::AssetStatus;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AssetListArgs;
use crate::commands::assets::{build_filter, location_name, responsible_name, type_name};
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::session::require_fetched;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct AssetListResponse {
    assets: Vec<AssetRow>,
    total: u32,
    page: u32,
    total_pages: u32,
    active: u32,
    inactive: u32,
    decommissioned: u32,
}

/// One asset flattened for display: embeds joined down to names.
#[derive(Serialize)]
pub(crate) struct AssetRow {
    id: i64,
    name: String,
    serial_number: i64,
    #[serde(rename = "type")]
    type_name: String,
    location: String,
    responsible: String,
    status: AssetStatus,
    cost: f64,
}

impl AssetRow {
    fn from_asset(asset: &Asset) -> Self {
        Self {
            id: asset.id,
            name: asset.name.clone(),
            serial_number: asset.serial_number,
            type_name: type_name(asset),
            location: location_name(asset),
            responsible: responsible_name(asset),
            status: asset.status,
            cost: asset.cost,
        }
    }
}

/// Display rows for a fetched page, shared with the interactive browser.
pub(crate) fn asset_rows(page: &AssetPage) -> Vec<AssetRow> {
    page.assets.iter().map(AssetRow::from_asset).collect()
}

/// Fetch and print one page of assets.
///
/// # Errors
///
/// Returns an error when no session is active, a filter flag is invalid,
/// or the request fails.
pub async fn run(args: &AssetListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = build_filter(&args.filter)?;
    let limit = effective_limit(args.limit, flags.limit, ctx.config.general.default_limit);
    let query = AssetQuery {
        page: args.page,
        limit,
        filter,
    };

    let spinner = Progress::spinner("loading assets");
    let result = ctx.service.fetch_assets(query).await;
    spinner.finish_clear();
    let page = require_fetched(result?)?;

    output(
        &AssetListResponse {
            assets: asset_rows(&page),
            total: page.total,
            page: page.page,
            total_pages: page.total.div_ceil(page.limit.max(1)),
            active: page.active_assets,
            inactive: page.inactive_assets,
            decommissioned: page.decommissioned_assets,
        },
        flags.format,
    )
}

#[cfg(test)]
mod tests {
    use inv_core::entities::{LocationRef, TypeRef, UserRef};
    use pretty_assertions::assert_eq;

    use super::*;

    fn asset_with_embeds() -> Asset {
        Asset {
            id: 7,
            name: "Latitude 5440".to_owned(),
            serial_number: 99,
            type_id: 2,
            description: None,
            responsible_id: 3,
            location_id: 4,
            status: AssetStatus::Active,
            cost: 1200.0,
            acquisition_date: "2024-03-01T00:00:00Z".parse().unwrap(),
            created_by: None,
            location: Some(LocationRef {
                id: 4,
                name: "HQ".to_owned(),
            }),
            type_ref: Some(TypeRef {
                id: 2,
                name: "Laptop".to_owned(),
                category: "IT".to_owned(),
            }),
            responsible: Some(UserRef {
                id: 3,
                first_name: "Ada".to_owned(),
                last_name: "Diaz".to_owned(),
                username: "adiaz".to_owned(),
            }),
        }
    }

    #[test]
    fn rows_join_embedded_names() {
        let row = AssetRow::from_asset(&asset_with_embeds());
        assert_eq!(row.type_name, "Laptop");
        assert_eq!(row.location, "HQ");
        assert_eq!(row.responsible, "Ada Diaz");
    }

    #[test]
    fn rows_fall_back_to_raw_ids_without_embeds() {
        let mut asset = asset_with_embeds();
        asset.type_ref = None;
        asset.location = None;
        asset.responsible = None;
        let row = AssetRow::from_asset(&asset);
        assert_eq!(row.type_name, "2");
        assert_eq!(row.location, "4");
        assert_eq!(row.responsible, "3");
    }
}
