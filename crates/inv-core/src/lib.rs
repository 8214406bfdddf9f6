//! # inv-core
//!
//! Core types and pure domain logic for Inventra.
//!
//! This crate provides the foundational pieces shared across all Inventra crates:
//! - Entity structs mirroring the inventory API's wire shapes
//! - Status, role, and change-kind enums
//! - The session identity derived from bearer-token claims
//! - Role capability resolution consumed by every view gate
//! - Asset list filters with empty-sentinel query normalization
//! - Client-side change-history reconciliation
//! - Error payload normalization shared by the auth and API layers

pub mod capability;
pub mod entities;
pub mod enums;
pub mod filter;
pub mod history;
pub mod identity;
pub mod wire;
