//! Per-resource subcommand definitions.

mod asset;
mod asset_type;
mod changelog;
mod location;
mod user;

pub use asset::{
    AssetCommands, AssetCreateArgs, AssetExportArgs, AssetFilterArgs, AssetListArgs,
    AssetUpdateArgs,
};
pub use asset_type::TypeCommands;
pub use changelog::ChangelogCommands;
pub use location::LocationCommands;
pub use user::{UserCommands, UserCreateArgs, UserUpdateArgs};
