//! # Song Library Common
//!
//! Shared code for the song library service:
//! - Database schema, models and repositories
//! - Filtered, paginated song queries
//! - Verse splitting for song lyrics
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod db;
pub mod error;
pub mod query;
pub mod verses;

pub use error::{Error, Result};
