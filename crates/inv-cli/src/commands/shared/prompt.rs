//! Interactive prompts, written to stderr so stdout stays parseable.

use std::io::{self, BufRead, Write};

/// Ask a yes/no question, defaulting to no. `assume_yes` (the `--yes`
/// flag) skips the prompt entirely.
///
/// # Errors
///
/// Returns an error when stdin or stderr is unavailable.
pub fn confirm(question: &str, assume_yes: bool) -> anyhow::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    eprint!("{question} [y/N] ");
    io::stderr().flush()?;
    Ok(is_affirmative(&read_reply()?))
}

/// Prompt for one line of input. The input echoes.
///
/// # Errors
///
/// Returns an error when stdin or stderr is unavailable.
pub fn line(label: &str) -> anyhow::Result<String> {
    eprint!("{label}");
    io::stderr().flush()?;
    read_reply()
}

fn read_reply() -> anyhow::Result<String> {
    let mut reply = String::new();
    io::stdin().lock().read_line(&mut reply)?;
    Ok(reply.trim().to_owned())
}

fn is_affirmative(reply: &str) -> bool {
    matches!(reply.trim(), "y" | "Y" | "yes" | "Yes" | "YES")
}

#[cfg(test)]
mod tests {
    use super::is_affirmative;

    #[test]
    fn accepts_yes_variants() {
        for reply in ["y", "Y", "yes", "Yes", "YES"] {
            assert!(is_affirmative(reply));
        }
    }

    #[test]
    fn anything_else_means_no() {
        for reply in ["", "n", "no", "nope", "quit"] {
            assert!(!is_affirmative(reply));
        }
    }
}
