//! Command handlers. Each one resolves its inputs, calls the service, and
//! prints a serializable response through [`crate::output::output`].

pub mod assets;
pub mod changelog;
pub mod dashboard;
pub mod dispatch;
pub mod locations;
pub mod login;
pub mod logout;
pub mod schema;
pub mod shared;
pub mod status;
pub mod types;
pub mod users;
