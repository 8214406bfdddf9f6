//! `inva assets history`: the reconciled change history of one asset.

use serde::Serialize;

use inv_core::entities::{ChangelogEntry, FieldChange, FieldValue};
use inv_core::enums::change_kind_label;
use inv_core::history::{ResolvedEntry, field_label, resolve_changes, sort_newest_first};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct HistoryResponse {
    asset: String,
    entries: Vec<HistoryEntry>,
}

#[derive(Serialize)]
struct HistoryEntry {
    at: String,
    kind: String,
    by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    changes: Vec<String>,
}

/// Print an asset's history newest first, with every entry's field diffs
/// reconciled against the next-newer snapshot.
///
/// # Errors
///
/// Returns an error for non-admin roles or when the request fails.
pub async fn run(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let spinner = Progress::spinner("loading history");
    let result = ctx.service.asset_history(id).await;
    spinner.finish_clear();
    let mut detail = result?;

    sort_newest_first(&mut detail.changelog);
    let resolved = resolve_changes(&detail.changelog, detail.asset.as_ref());
    let entries = detail
        .changelog
        .iter()
        .zip(&resolved)
        .map(|(entry, resolved)| render_entry(entry, resolved))
        .collect();

    let asset = detail
        .asset
        .map_or_else(|| format!("asset {id}"), |asset| asset.name);

    output(&HistoryResponse { asset, entries }, flags.format)
}

fn render_entry(entry: &ChangelogEntry, resolved: &ResolvedEntry) -> HistoryEntry {
    let by = entry.user.as_ref().map_or_else(
        || format!("user {}", entry.user_id),
        inv_core::entities::UserRef::display_name,
    );

    let note = if resolved.creation {
        Some("initial creation".to_owned())
    } else if resolved.changes.is_empty() {
        Some("no field changes recorded".to_owned())
    } else {
        None
    };

    HistoryEntry {
        at: entry.created_at.to_rfc3339(),
        kind: change_kind_label(&entry.change_type).to_owned(),
        by,
        reason: entry.change_reason.clone(),
        note,
        changes: resolved.changes.iter().map(format_change).collect(),
    }
}

/// One diff line: `Label: old -> new`, with `-` standing in for an unset
/// side.
fn format_change(change: &FieldChange) -> String {
    let old = change
        .old_value
        .as_ref()
        .map_or_else(|| "-".to_owned(), FieldValue::coerce);
    let new = change
        .new_value
        .as_ref()
        .map_or_else(|| "-".to_owned(), FieldValue::coerce);
    format!("{}: {old} -> {new}", field_label(&change.field))
}
