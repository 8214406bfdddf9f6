//! Client-side change-history reconciliation.
//!
//! Older changelog entries carry no explicit diff list, only flat
//! `old_<field>` snapshots of values before the mutation. This module
//! rebuilds per-field before/after diffs for display: each entry's shadows
//! are compared against the next more recent entry's shadows, or against the
//! live asset for the newest entry. Missing data is skipped, never an error.

use serde::Serialize;

use crate::entities::{Asset, ChangelogEntry, FieldChange};
use crate::enums::ChangeKind;

// ---------------------------------------------------------------------------
// TrackedField
// ---------------------------------------------------------------------------

/// Asset fields tracked through shadow `old_<field>` snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedField {
    Name,
    SerialNumber,
    Description,
    Cost,
    Status,
    LocationId,
    ResponsibleId,
}

impl TrackedField {
    /// Fixed iteration order; reconciled diffs are emitted in this order, not
    /// in detection order.
    pub const ORDER: [Self; 7] = [
        Self::Name,
        Self::SerialNumber,
        Self::Description,
        Self::Cost,
        Self::Status,
        Self::LocationId,
        Self::ResponsibleId,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::SerialNumber => "serial_number",
            Self::Description => "description",
            Self::Cost => "cost",
            Self::Status => "status",
            Self::LocationId => "location_id",
            Self::ResponsibleId => "responsible_id",
        }
    }
}

/// Display label for a change-record field name. Covers the reconciled
/// fields plus names only server-supplied diffs use; unknown names pass
/// through raw.
#[must_use]
pub fn field_label(field: &str) -> &str {
    match field {
        "name" => "Name",
        "serial_number" => "Serial number",
        "type_id" => "Type",
        "description" => "Description",
        "location_id" => "Location",
        "status" => "Status",
        "responsible_id" => "Responsible",
        "cost" => "Cost",
        "acquisition_date" => "Acquisition date",
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// Sort entries newest-first (index 0 = most recent), the ordering
/// [`resolve_changes`] requires. Callers establish this explicitly instead
/// of trusting transport order.
pub fn sort_newest_first(entries: &mut [ChangelogEntry]) {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Diffs resolved for one history entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResolvedEntry {
    /// True when the entry records the asset's initial creation.
    pub creation: bool,
    /// Ordered field diffs; empty for creations and no-change records.
    pub changes: Vec<FieldChange>,
}

/// Resolve display diffs for a newest-first entry sequence.
///
/// `current` is the asset's live snapshot, compared against the newest
/// entry's shadows; without it the newest entry can only use explicit diffs.
#[must_use]
pub fn resolve_changes(
    entries: &[ChangelogEntry],
    current: Option<&Asset>,
) -> Vec<ResolvedEntry> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| resolve_entry(entries, index, entry, current))
        .collect()
}

fn resolve_entry(
    entries: &[ChangelogEntry],
    index: usize,
    entry: &ChangelogEntry,
    current: Option<&Asset>,
) -> ResolvedEntry {
    let creation = ChangeKind::parse(&entry.change_type) == Some(ChangeKind::Create);

    // Server-supplied diffs are authoritative when present and non-empty.
    if let Some(changes) = &entry.changes
        && !changes.is_empty()
    {
        return ResolvedEntry {
            creation,
            changes: changes.clone(),
        };
    }

    // A creation has no prior state to diff against.
    if creation {
        return ResolvedEntry {
            creation,
            changes: Vec::new(),
        };
    }

    let mut changes = Vec::new();
    for field in TrackedField::ORDER {
        let Some(old) = entry.shadow(field) else {
            continue;
        };
        let newer = if index == 0 {
            current.and_then(|asset| asset.current_value(field))
        } else {
            entries[index - 1].shadow(field).cloned()
        };
        let Some(new) = newer else {
            continue;
        };
        if old.coerce() != new.coerce() {
            changes.push(FieldChange {
                field: field.as_str().to_owned(),
                old_value: Some(old.clone()),
                new_value: Some(new),
            });
        }
    }

    ResolvedEntry { creation, changes }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
