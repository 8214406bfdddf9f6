//! Interactive asset browser: a filtered, paginated view over the asset
//! list with debounced fetching, driven from a small line-based REPL.

pub mod controller;
pub mod repl;
