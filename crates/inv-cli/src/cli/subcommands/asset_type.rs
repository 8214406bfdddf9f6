//! `inva types` subcommands.

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum TypeCommands {
    /// List all asset types.
    List,

    /// Add an asset type.
    Create {
        /// Type name.
        #[arg(long)]
        name: String,

        /// Category the type belongs to.
        #[arg(long)]
        category: String,

        /// Free-form description.
        #[arg(long)]
        description: Option<String>,
    },

    /// Edit an asset type.
    Update {
        /// Type id.
        id: i64,

        /// New name.
        #[arg(long)]
        name: String,

        /// New category.
        #[arg(long)]
        category: String,

        /// New description.
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete an asset type.
    Delete {
        /// Type id.
        id: i64,

        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}
