//! Song info lookup client
//!
//! Queries the external song info service for a song's release date, lyrics
//! and link:
//!
//! `GET {base_url}/info?group=<group>&song=<song>`
//!
//! Every failure is reported as a [`LookupError`]; callers treat any of them
//! as "no data".

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("songlib/", env!("CARGO_PKG_VERSION"));

/// Lookup client errors
#[derive(Debug, Error)]
pub enum LookupError {
    /// Network communication error, including timeouts
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Lookup service answered with a non-success status
    #[error("API error {0}")]
    ApiError(u16),

    /// Failed to parse API response JSON
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Song details returned by the lookup service
///
/// Missing fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SongInfo {
    /// Release date, `YYYY-MM-DD`
    #[serde(rename = "releaseDate", default)]
    pub release_date: String,
    /// Full lyrics
    #[serde(default)]
    pub text: String,
    /// External link, e.g. a video URL
    #[serde(default)]
    pub link: String,
}

/// Song info lookup client
#[derive(Debug, Clone)]
pub struct SongInfoClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl SongInfoClient {
    /// Create a client for `base_url` with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch song details for a group and title
    pub async fn fetch_song_info(&self, group: &str, song: &str) -> Result<SongInfo, LookupError> {
        let url = format!("{}/info", self.base_url);

        tracing::debug!(url = %url, group, song, "Querying song info service");

        let response = self
            .http_client
            .get(&url)
            .query(&[("group", group), ("song", song)])
            .send()
            .await
            .map_err(|e| LookupError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::ApiError(status.as_u16()));
        }

        let info: SongInfo = response
            .json()
            .await
            .map_err(|e| LookupError::ParseError(e.to_string()))?;

        tracing::info!(
            group,
            song,
            release_date = %info.release_date,
            has_text = !info.text.is_empty(),
            "Song info lookup successful"
        );

        Ok(info)
    }
}
