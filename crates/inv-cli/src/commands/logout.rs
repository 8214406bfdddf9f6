//! `inva logout`.

use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct LogoutResponse {
    logged_out: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

/// Drop the persisted session. Harmless when none is active.
///
/// # Errors
///
/// Returns an error when the stored token cannot be removed.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let had_session = ctx.session.is_authenticated();
    ctx.session.logout()?;

    output(
        &LogoutResponse {
            logged_out: true,
            note: (!had_session).then(|| "no session was active".to_owned()),
        },
        flags.format,
    )
}
