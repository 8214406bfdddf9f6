//! Flags shared by every subcommand.

use clap::ValueEnum;

/// How command output is rendered on stdout.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Aligned text table.
    Table,
    /// Compact single-line JSON, for piping.
    Raw,
}

/// Snapshot of the global flags, extracted once after parsing so handlers
/// do not carry the whole [`super::Cli`] around.
#[derive(Clone, Copy, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub limit: Option<u32>,
    pub quiet: bool,
    pub verbose: bool,
}
