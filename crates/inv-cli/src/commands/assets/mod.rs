//! `inva assets` handlers.

mod create;
mod delete;
mod export;
mod get;
pub(crate) mod history;
mod list;
mod update;

pub(crate) use export::download;
pub(crate) use list::asset_rows;

use inv_core::entities::Asset;
use inv_core::enums::AssetStatus;
use inv_core::filter::AssetFilter;

use crate::browse;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::{AssetCommands, AssetFilterArgs};
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;

/// Route an `inva assets` action.
///
/// # Errors
///
/// Propagates whatever the action fails with.
pub async fn handle(
    action: &AssetCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AssetCommands::List(args) => list::run(args, ctx, flags).await,
        AssetCommands::Get { id } => get::run(*id, ctx, flags).await,
        AssetCommands::Create(args) => create::run(args, ctx, flags).await,
        AssetCommands::Update(args) => update::run(args, ctx, flags).await,
        AssetCommands::Delete { id, yes } => delete::run(*id, *yes, ctx, flags).await,
        AssetCommands::History { id } => history::run(*id, ctx, flags).await,
        AssetCommands::Export(args) => export::run(args, ctx, flags).await,
        AssetCommands::Browse => browse::repl::run(ctx, flags).await,
    }
}

/// Build the wire filter from the optional flag set. Omitted flags stay at
/// their sentinels and are stripped from the query string.
pub(crate) fn build_filter(args: &AssetFilterArgs) -> anyhow::Result<AssetFilter> {
    let status = args
        .status
        .as_deref()
        .map(|raw| parse_enum::<AssetStatus>(raw, "status"))
        .transpose()?;

    Ok(AssetFilter {
        name: args.name.clone().unwrap_or_default(),
        serial_number: args.serial_number.unwrap_or_default(),
        type_id: args.type_id.unwrap_or_default(),
        description: args.description.clone().unwrap_or_default(),
        location_id: args.location_id.unwrap_or_default(),
        status,
        responsible_id: args.responsible_id.unwrap_or_default(),
        cost: args.cost.unwrap_or_default(),
    })
}

/// Joined type name, falling back to the raw id when the embed is absent.
pub(crate) fn type_name(asset: &Asset) -> String {
    asset
        .type_ref
        .as_ref()
        .map_or_else(|| asset.type_id.to_string(), |type_ref| type_ref.name.clone())
}

/// Joined location name, falling back to the raw id.
pub(crate) fn location_name(asset: &Asset) -> String {
    asset.location.as_ref().map_or_else(
        || asset.location_id.to_string(),
        |location| location.name.clone(),
    )
}

/// Joined responsible-user name, falling back to the raw id.
pub(crate) fn responsible_name(asset: &Asset) -> String {
    asset.responsible.as_ref().map_or_else(
        || asset.responsible_id.to_string(),
        inv_core::entities::UserRef::display_name,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn omitted_flags_build_an_inactive_filter() {
        let filter = build_filter(&AssetFilterArgs::default()).unwrap();
        assert!(!filter.has_active());
        assert!(filter.to_query_pairs().is_empty());
    }

    #[test]
    fn provided_flags_reach_the_filter() {
        let args = AssetFilterArgs {
            name: Some("latitude".to_owned()),
            status: Some("inactive".to_owned()),
            location_id: Some(4),
            ..AssetFilterArgs::default()
        };
        let filter = build_filter(&args).unwrap();
        assert_eq!(filter.name, "latitude");
        assert_eq!(filter.status, Some(AssetStatus::Inactive));
        assert_eq!(filter.location_id, 4);
        assert!(filter.has_active());
    }

    #[test]
    fn bad_status_is_rejected() {
        let args = AssetFilterArgs {
            status: Some("retired".to_owned()),
            ..AssetFilterArgs::default()
        };
        let error = build_filter(&args).unwrap_err();
        assert!(error.to_string().contains("invalid status 'retired'"));
    }
}
