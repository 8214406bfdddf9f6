//! Top-level subcommands.

use clap::{Args, Subcommand};

use super::subcommands::{
    AssetCommands, ChangelogCommands, LocationCommands, TypeCommands, UserCommands,
};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and persist the session token.
    Login(LoginArgs),

    /// Drop the persisted session.
    Logout,

    /// Show who is logged in and what the role allows.
    Status,

    /// Inventory totals: asset counts and combined value.
    Dashboard,

    /// Inspect and manage assets.
    Assets {
        #[command(subcommand)]
        action: AssetCommands,
    },

    /// Manage storage locations.
    Locations {
        #[command(subcommand)]
        action: LocationCommands,
    },

    /// Manage asset types.
    Types {
        #[command(subcommand)]
        action: TypeCommands,
    },

    /// Manage user accounts.
    Users {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// The inventory-wide change feed.
    Changelog {
        #[command(subcommand)]
        action: ChangelogCommands,
    },

    /// Print the JSON Schema for a wire type.
    Schema(SchemaArgs),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username; prompted for when omitted.
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Password; prompted for when omitted.
    #[arg(long, short = 'p')]
    pub password: Option<String>,
}

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Registered type name; omit to list all names.
    pub type_name: Option<String>,
}
