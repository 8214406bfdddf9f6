//! `inva assets` subcommands.

use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum AssetCommands {
    /// List one page of assets.
    List(AssetListArgs),

    /// Show one asset with joined names and its history size.
    Get {
        /// Asset id.
        id: i64,
    },

    /// Register a new asset.
    Create(AssetCreateArgs),

    /// Change fields on an asset.
    Update(AssetUpdateArgs),

    /// Delete an asset.
    Delete {
        /// Asset id.
        id: i64,

        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },

    /// Show an asset's reconciled change history (admin only).
    History {
        /// Asset id.
        id: i64,
    },

    /// Download the spreadsheet export.
    Export(AssetExportArgs),

    /// Browse the inventory interactively.
    Browse,
}

/// Server-side filters shared by `list` and `export`. Omitted flags are
/// left out of the query entirely.
#[derive(Args, Clone, Debug, Default)]
pub struct AssetFilterArgs {
    /// Filter by name substring.
    #[arg(long)]
    pub name: Option<String>,

    /// Filter by exact serial number.
    #[arg(long)]
    pub serial_number: Option<i64>,

    /// Filter by type id.
    #[arg(long)]
    pub type_id: Option<i64>,

    /// Filter by description substring.
    #[arg(long)]
    pub description: Option<String>,

    /// Filter by location id.
    #[arg(long)]
    pub location_id: Option<i64>,

    /// Filter by status (active, inactive, decommissioned).
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by responsible user id.
    #[arg(long)]
    pub responsible_id: Option<i64>,

    /// Filter by exact cost.
    #[arg(long)]
    pub cost: Option<i64>,
}

#[derive(Args, Debug)]
pub struct AssetListArgs {
    /// Page to fetch (1-based).
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Results per page; overrides the global `--limit`.
    #[arg(long)]
    pub limit: Option<u32>,

    #[command(flatten)]
    pub filter: AssetFilterArgs,
}

#[derive(Args, Debug)]
pub struct AssetCreateArgs {
    /// Asset name.
    #[arg(long)]
    pub name: String,

    /// Serial number.
    #[arg(long)]
    pub serial_number: i64,

    /// Type id (see `inva types list`).
    #[arg(long)]
    pub type_id: i64,

    /// Free-form description.
    #[arg(long)]
    pub description: Option<String>,

    /// Location id (see `inva locations list`).
    #[arg(long, default_value_t = 0)]
    pub location_id: i64,

    /// Responsible user id (see `inva users list`).
    #[arg(long, default_value_t = 0)]
    pub responsible_id: i64,

    /// Initial status (active, inactive, decommissioned).
    #[arg(long, default_value = "active")]
    pub status: String,

    /// Acquisition cost.
    #[arg(long, default_value_t = 0.0)]
    pub cost: f64,
}

#[derive(Args, Debug)]
pub struct AssetUpdateArgs {
    /// Asset id.
    pub id: i64,

    /// New name.
    #[arg(long)]
    pub name: Option<String>,

    /// New serial number.
    #[arg(long)]
    pub serial_number: Option<i64>,

    /// New type id.
    #[arg(long)]
    pub type_id: Option<i64>,

    /// New description.
    #[arg(long)]
    pub description: Option<String>,

    /// New location id.
    #[arg(long)]
    pub location_id: Option<i64>,

    /// New responsible user id.
    #[arg(long)]
    pub responsible_id: Option<i64>,

    /// New status (active, inactive, decommissioned).
    #[arg(long)]
    pub status: Option<String>,

    /// New cost.
    #[arg(long)]
    pub cost: Option<f64>,
}

#[derive(Args, Debug)]
pub struct AssetExportArgs {
    #[command(flatten)]
    pub filter: AssetFilterArgs,

    /// Write to this path instead of the server-suggested filename.
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(long)]
    pub yes: bool,
}
