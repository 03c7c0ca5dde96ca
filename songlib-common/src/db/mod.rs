//! Database models and queries

pub mod groups;
pub mod init;
pub mod models;
pub mod songs;

pub use init::*;
pub use models::*;
