//! `inva status`.

use serde::Serialize;

use inv_auth::TokenClaims;
use inv_core::capability::{Capabilities, Section};
use inv_core::enums::Role;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct StatusResponse {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    capabilities: Option<Capabilities>,
    sections: Vec<Section>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

/// Report who is logged in, where the token came from, and what the role
/// allows. Works offline; nothing here talks to the API.
///
/// # Errors
///
/// Returns an error when the response cannot be rendered.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = match ctx.session.identity() {
        Some(identity) => {
            let expires_at = ctx
                .session
                .token()
                .and_then(|token| TokenClaims::decode(&token).ok())
                .and_then(|claims| claims.expires_at())
                .map(|at| at.to_rfc3339());

            StatusResponse {
                authenticated: true,
                user: Some(identity.display_name()),
                username: Some(identity.username.clone()),
                role: Some(identity.role),
                capabilities: Some(Capabilities::for_role(identity.role)),
                sections: Section::visible_sections(identity.role),
                token_source: inv_auth::token_store::source().map(|source| source.to_string()),
                expires_at,
                note: None,
            }
        }
        None => StatusResponse {
            authenticated: false,
            user: None,
            username: None,
            role: None,
            capabilities: None,
            sections: Vec::new(),
            token_source: None,
            expires_at: None,
            note: Some("not logged in; run `inva login` first".to_owned()),
        },
    };

    output(&response, flags.format)
}
