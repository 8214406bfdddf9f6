//! Terminal capability detection, resolved once from the global flags.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

/// Output preferences derived from the flags and the environment.
#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    /// Color status cells in table output.
    pub table_color: bool,
    /// Show spinners while requests are in flight.
    pub progress: bool,
    /// Detected terminal width, when one is known.
    pub term_width: Option<usize>,
}

impl UiPrefs {
    const PLAIN: Self = Self {
        table_color: false,
        progress: false,
        term_width: None,
    };
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

/// Resolve preferences from the flags and the environment. Called once
/// from `main` before any command runs; later calls are ignored.
pub fn init(flags: &GlobalFlags) {
    let tty = std::io::stdout().is_terminal();
    let no_color = std::env::var_os("NO_COLOR").is_some();

    let prefs = UiPrefs {
        table_color: tty && !no_color && !flags.quiet && flags.format == OutputFormat::Table,
        // JSON output is usually piped; keep the spinner out of the way.
        progress: tty && !flags.quiet && flags.format != OutputFormat::Json,
        term_width: term_width(),
    };
    let _ = UI_PREFS.set(prefs);
}

/// The resolved preferences; plain output until [`init`] has run.
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or(UiPrefs::PLAIN)
}

fn term_width() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|columns| columns.trim().parse().ok())
        .filter(|width| *width >= 40)
}
