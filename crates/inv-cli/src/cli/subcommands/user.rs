//! `inva users` subcommands.

use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List all user accounts.
    List,

    /// Register a user account.
    Create(UserCreateArgs),

    /// Edit a user account.
    Update(UserUpdateArgs),

    /// Delete a user account.
    Delete {
        /// User id.
        id: i64,

        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct UserCreateArgs {
    /// First name.
    #[arg(long)]
    pub first_name: String,

    /// Last name.
    #[arg(long)]
    pub last_name: String,

    /// Login name.
    #[arg(long)]
    pub username: String,

    /// Email address.
    #[arg(long)]
    pub email: String,

    /// Initial password.
    #[arg(long)]
    pub password: String,

    /// Role name (admin, manager, inventory).
    #[arg(long)]
    pub role: String,
}

#[derive(Args, Debug)]
pub struct UserUpdateArgs {
    /// User id.
    pub id: i64,

    /// New first name.
    #[arg(long)]
    pub first_name: Option<String>,

    /// New last name.
    #[arg(long)]
    pub last_name: Option<String>,

    /// New login name.
    #[arg(long)]
    pub username: Option<String>,

    /// New email address.
    #[arg(long)]
    pub email: Option<String>,

    /// New password.
    #[arg(long)]
    pub password: Option<String>,

    /// New role name (admin, manager, inventory).
    #[arg(long)]
    pub role: Option<String>,
}
