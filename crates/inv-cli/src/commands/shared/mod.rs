//! Helpers shared across command handlers.

pub mod limit;
pub mod parse;
pub mod prompt;
pub mod session;
