//! `inva assets update`.

use serde::Serialize;

use inv_api::assets::AssetPatch;
use inv_core::entities::Asset;
use inv_core::enums::AssetStatus;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AssetUpdateArgs;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct AssetUpdateResponse {
    message: String,
    asset: Asset,
}

/// Patch fields on an asset. At least one field flag is required.
///
/// # Errors
///
/// Returns an error when no field flag is given, a flag is invalid, the
/// role does not allow the change, or the server rejects it.
pub async fn run(
    args: &AssetUpdateArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let patch = build_patch(args)?;
    if patch.is_empty() {
        anyhow::bail!(
            "at least one of --name, --serial-number, --type-id, --description, \
             --location-id, --responsible-id, --status, or --cost must be provided"
        );
    }

    let spinner = Progress::spinner("updating asset");
    let result = ctx.service.update_asset(args.id, patch).await;
    spinner.finish_clear();
    let mutation = result?;

    output(
        &AssetUpdateResponse {
            message: mutation.message,
            asset: mutation.record,
        },
        flags.format,
    )
}

fn build_patch(args: &AssetUpdateArgs) -> anyhow::Result<AssetPatch> {
    let status = args
        .status
        .as_deref()
        .map(|raw| parse_enum::<AssetStatus>(raw, "status"))
        .transpose()?;

    Ok(AssetPatch {
        name: args.name.clone(),
        serial_number: args.serial_number,
        type_id: args.type_id,
        description: args.description.clone(),
        responsible_id: args.responsible_id,
        location_id: args.location_id,
        status,
        cost: args.cost,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn bare_args() -> AssetUpdateArgs {
        AssetUpdateArgs {
            id: 7,
            name: None,
            serial_number: None,
            type_id: None,
            description: None,
            location_id: None,
            responsible_id: None,
            status: None,
            cost: None,
        }
    }

    #[test]
    fn no_flags_build_an_empty_patch() {
        let patch = build_patch(&bare_args()).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn any_single_flag_fills_the_patch() {
        let mut args = bare_args();
        args.cost = Some(450.5);
        let patch = build_patch(&args).unwrap();
        assert!(!patch.is_empty());
        assert_eq!(patch.cost, Some(450.5));
    }

    #[test]
    fn status_flag_is_parsed() {
        let mut args = bare_args();
        args.status = Some("decommissioned".to_owned());
        let patch = build_patch(&args).unwrap();
        assert_eq!(patch.status, Some(AssetStatus::Decommissioned));
    }

    #[test]
    fn bad_status_is_rejected() {
        let mut args = bare_args();
        args.status = Some("gone".to_owned());
        assert!(build_patch(&args).is_err());
    }
}
