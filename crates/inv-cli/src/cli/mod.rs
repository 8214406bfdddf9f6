//! Command line surface: parser definitions only, no handler logic.

mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "inva",
    version,
    about = "Terminal client for the Inventra asset inventory"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format.
    #[arg(long, short = 'f', global = true, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Default result limit for list commands.
    #[arg(long, short = 'l', global = true)]
    pub limit: Option<u32>,

    /// Only log errors; also disables spinners.
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Log debug detail to stderr.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract the global flags for handing to command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}
