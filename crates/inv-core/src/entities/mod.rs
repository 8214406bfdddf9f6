//! Entity structs mirroring the inventory API's wire shapes.
//!
//! All entities are server-owned; the client holds read-through copies only.
//! Field spellings follow the wire exactly, including the backend's mixed
//! casing (`createdAt`, `activeAssets`) where it occurs.

mod asset;
mod asset_type;
mod changelog;
mod location;
mod user;

pub use asset::{Asset, AssetDetail, AssetPage, AssetStats};
pub use asset_type::{AssetType, TypeRef};
pub use changelog::{ChangelogEntry, FieldChange, FieldValue};
pub use location::{Location, LocationRef};
pub use user::{RoleRef, User, UserRef};

/// Entities carrying a server-assigned numeric id, spliceable into held
/// collections by id.
pub trait Identified {
    fn id(&self) -> i64;
}
