//! `inva locations` subcommands.

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum LocationCommands {
    /// List all locations.
    List,

    /// Add a location.
    Create {
        /// Location name.
        #[arg(long)]
        name: String,

        /// Free-form description.
        #[arg(long)]
        description: Option<String>,
    },

    /// Rename or re-describe a location.
    Update {
        /// Location id.
        id: i64,

        /// New name.
        #[arg(long)]
        name: String,

        /// New description.
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a location.
    Delete {
        /// Location id.
        id: i64,

        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}
