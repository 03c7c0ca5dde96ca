//! Business logic behind the song endpoints

pub mod lookup_client;
pub mod song_manager;

pub use lookup_client::{LookupError, SongInfo, SongInfoClient};
