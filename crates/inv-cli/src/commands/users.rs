//! `inva users` handlers. Roles travel as names on the command line and as
//! numeric ids on the wire; the conversion lives in the payload types.

use serde::Serialize;

use inv_api::resource::{NewUser, UserPatch};
use inv_core::entities::User;
use inv_core::enums::Role;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{UserCommands, UserCreateArgs, UserUpdateArgs};
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::prompt::confirm;
use crate::commands::shared::session::require_fetched;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct UserRow {
    id: i64,
    username: String,
    name: String,
    email: String,
    role: Role,
}

#[derive(Serialize)]
struct UserMutationResponse {
    message: String,
    user: User,
}

#[derive(Serialize)]
struct UserDeleteResponse {
    deleted: bool,
    message: String,
}

/// Route an `inva users` action.
///
/// # Errors
///
/// Propagates whatever the action fails with.
pub async fn handle(
    action: &UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        UserCommands::List => list(ctx, flags).await,
        UserCommands::Create(args) => create(args, ctx, flags).await,
        UserCommands::Update(args) => update(args, ctx, flags).await,
        UserCommands::Delete { id, yes } => delete(*id, *yes, ctx, flags).await,
    }
}

async fn list(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let spinner = Progress::spinner("loading users");
    let result = ctx.service.fetch_users().await;
    spinner.finish_clear();
    let users = require_fetched(result?)?;

    let rows: Vec<UserRow> = users
        .iter()
        .map(|user| UserRow {
            id: user.id,
            username: user.username.clone(),
            name: user.display_name(),
            email: user.email.clone(),
            role: user.role.name,
        })
        .collect();
    output(&rows, flags.format)
}

async fn create(args: &UserCreateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let role = parse_enum::<Role>(&args.role, "role")?;
    let form = NewUser {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        username: args.username.clone(),
        email: args.email.clone(),
        password: args.password.clone(),
        role,
    };

    let spinner = Progress::spinner("creating user");
    let result = ctx.service.create_user(&form).await;
    spinner.finish_clear();
    let mutation = result?;
    output(
        &UserMutationResponse {
            message: mutation.message,
            user: mutation.record,
        },
        flags.format,
    )
}

async fn update(args: &UserUpdateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let patch = build_patch(args)?;
    if patch.is_empty() {
        anyhow::bail!(
            "at least one of --first-name, --last-name, --username, --email, \
             --password, or --role must be provided"
        );
    }

    let spinner = Progress::spinner("updating user");
    let result = ctx.service.update_user(args.id, &patch).await;
    spinner.finish_clear();
    let mutation = result?;
    output(
        &UserMutationResponse {
            message: mutation.message,
            user: mutation.record,
        },
        flags.format,
    )
}

async fn delete(id: i64, yes: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !confirm(&format!("Delete user {id}?"), yes)? {
        return output(
            &UserDeleteResponse {
                deleted: false,
                message: "delete cancelled".to_owned(),
            },
            flags.format,
        );
    }

    let spinner = Progress::spinner("deleting user");
    let result = ctx.service.delete_user(id).await;
    spinner.finish_clear();
    let message = result?;
    output(
        &UserDeleteResponse {
            deleted: true,
            message,
        },
        flags.format,
    )
}

fn build_patch(args: &UserUpdateArgs) -> anyhow::Result<UserPatch> {
    let role = args
        .role
        .as_deref()
        .map(|raw| parse_enum::<Role>(raw, "role"))
        .transpose()?;

    Ok(UserPatch {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        username: args.username.clone(),
        email: args.email.clone(),
        password: args.password.clone(),
        role,
    })
}
