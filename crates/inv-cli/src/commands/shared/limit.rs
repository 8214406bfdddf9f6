//! Limit resolution for list commands.

/// Resolve the effective limit: the subcommand flag wins, then the global
/// `--limit`, then the configured default.
#[must_use]
pub fn effective_limit(local: Option<u32>, global: Option<u32>, fallback: u32) -> u32 {
    local.or(global).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn subcommand_flag_wins() {
        assert_eq!(effective_limit(Some(5), Some(50), 10), 5);
    }

    #[test]
    fn global_flag_beats_the_default() {
        assert_eq!(effective_limit(None, Some(50), 10), 50);
    }

    #[test]
    fn falls_back_to_the_configured_default() {
        assert_eq!(effective_limit(None, None, 10), 10);
    }
}
