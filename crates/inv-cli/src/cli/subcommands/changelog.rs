//! `inva changelog` subcommands.

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum ChangelogCommands {
    /// List change entries, newest first.
    List {
        /// Substring match over asset name, acting user, and change kind.
        #[arg(long)]
        search: Option<String>,

        /// Maximum entries to show; overrides the global `--limit`.
        #[arg(long)]
        limit: Option<u32>,
    },
}
