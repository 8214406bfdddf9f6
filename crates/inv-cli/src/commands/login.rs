//! `inva login`.

use serde::Serialize;

use inv_core::capability::Section;
use inv_core::enums::Role;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LoginArgs;
use crate::commands::shared::prompt;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct LoginResponse {
    authenticated: bool,
    user: String,
    role: Role,
    sections: Vec<Section>,
}

/// Log in with the given or prompted credentials and persist the session.
///
/// # Errors
///
/// Returns an error when the credentials are rejected or the API is
/// unreachable.
pub async fn handle(args: &LoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let username = match &args.username {
        Some(username) => username.clone(),
        None => prompt::line("Username: ")?,
    };
    let password = match &args.password {
        Some(password) => password.clone(),
        None => prompt::line("Password: ")?,
    };

    let spinner = Progress::spinner("logging in");
    let result = ctx.service.login(username.trim(), &password).await;
    spinner.finish_clear();
    let identity = result?;

    tracing::debug!(user = %identity.username, role = %identity.role, "login succeeded");

    output(
        &LoginResponse {
            authenticated: true,
            user: identity.display_name(),
            role: identity.role,
            sections: Section::visible_sections(identity.role),
        },
        flags.format,
    )
}
