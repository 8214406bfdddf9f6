//! # inv-api
//!
//! HTTP clients and shared collection state for the Inventra API.
//!
//! The pieces stack the way the client uses them:
//! - [`client::ApiClient`] owns the connection, the bearer token, and the
//!   unauthorized-teardown rule
//! - [`assets::AssetsClient`], [`changelog::ChangelogClient`], and the
//!   generic [`resource::ResourceClient`] map one REST collection each
//! - [`store::CollectionStore`] holds spliceable snapshots
//! - [`service::InventoryService`] ties it together: session gating,
//!   capability refusals, and the splice-versus-refetch rules

pub mod assets;
pub mod changelog;
pub mod client;
pub mod error;
pub mod resource;
pub mod service;
pub mod store;

mod http;

pub use client::ApiClient;
pub use error::ApiError;
pub use resource::Mutation;
pub use service::{AssetQuery, AssetView, InventoryService};
