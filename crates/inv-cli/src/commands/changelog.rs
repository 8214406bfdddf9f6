//! `inva changelog` handlers: the inventory-wide change feed.

use std::collections::HashMap;

use serde::Serialize;

use inv_api::AssetQuery;
use inv_core::enums::change_kind_label;
use inv_core::history::sort_newest_first;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ChangelogCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::session::require_fetched;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Page size for the asset-name lookup. Entries whose asset is beyond this
/// window show as deleted, like any other unresolvable id.
const NAME_LOOKUP_LIMIT: u32 = 500;

/// Cap on printed entries when no `--limit` flag is given.
const DEFAULT_FEED_LIMIT: u32 = 50;

#[derive(Serialize)]
struct ChangelogListResponse {
    entries: Vec<ChangeRow>,
    /// Matching entries before the limit was applied.
    total: usize,
}

#[derive(Serialize)]
struct ChangeRow {
    at: String,
    asset: String,
    kind: String,
    by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// Route an `inva changelog` action.
///
/// # Errors
///
/// Propagates whatever the action fails with.
pub async fn handle(
    action: &ChangelogCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ChangelogCommands::List { search, limit } => {
            list(search.as_deref(), *limit, ctx, flags).await
        }
    }
}

async fn list(
    search: Option<&str>,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let spinner = Progress::spinner("loading change feed");
    let fetched = fetch_feed(ctx).await;
    spinner.finish_clear();
    let (mut entries, names) = fetched?;

    // The API serves oldest first; the feed reads newest first.
    sort_newest_first(&mut entries);

    let rows: Vec<ChangeRow> = entries
        .iter()
        .map(|entry| ChangeRow {
            at: entry.created_at.to_rfc3339(),
            asset: names
                .get(&entry.asset_id)
                .cloned()
                .unwrap_or_else(|| "deleted asset".to_owned()),
            kind: change_kind_label(&entry.change_type).to_owned(),
            by: entry.user.as_ref().map_or_else(
                || format!("user {}", entry.user_id),
                inv_core::entities::UserRef::display_name,
            ),
            reason: entry.change_reason.clone(),
        })
        .collect();

    let needle = search.map(str::to_lowercase);
    let matched: Vec<ChangeRow> = rows
        .into_iter()
        .filter(|row| needle.as_deref().is_none_or(|needle| row_matches(row, needle)))
        .collect();

    let total = matched.len();
    let limit = effective_limit(limit, flags.limit, DEFAULT_FEED_LIMIT);
    let entries: Vec<ChangeRow> = matched
        .into_iter()
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .collect();

    output(&ChangelogListResponse { entries, total }, flags.format)
}

/// Fetch the feed and the asset-name lookup window it is joined against.
async fn fetch_feed(
    ctx: &AppContext,
) -> anyhow::Result<(Vec<inv_core::entities::ChangelogEntry>, HashMap<i64, String>)> {
    let entries = require_fetched(ctx.service.fetch_changelog().await?)?;
    let names = asset_names(ctx).await?;
    Ok((entries, names))
}

/// Resolve asset ids to names from the first lookup window of the list
/// endpoint.
async fn asset_names(ctx: &AppContext) -> anyhow::Result<HashMap<i64, String>> {
    let query = AssetQuery {
        limit: NAME_LOOKUP_LIMIT,
        ..AssetQuery::default()
    };
    let page = require_fetched(ctx.service.fetch_assets(query).await?)?;
    Ok(page
        .assets
        .into_iter()
        .map(|asset| (asset.id, asset.name))
        .collect())
}

/// Case-insensitive substring match over the visible columns, mirroring
/// the feed's search box. `needle` must already be lowercased.
fn row_matches(row: &ChangeRow, needle: &str) -> bool {
    row.asset.to_lowercase().contains(needle)
        || row.by.to_lowercase().contains(needle)
        || row.kind.to_lowercase().contains(needle)
}
