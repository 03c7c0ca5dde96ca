//! Database models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar date format used for storage, filters and responses
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Release date given to songs that have none (`0001-01-01`)
pub fn zero_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or_default()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Format a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Performing group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Group {
    pub id: i64,
    pub name: String,
}

/// Song row as stored in the `songs` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Song {
    pub id: i64,
    pub group_id: i64,
    #[sqlx(rename = "song")]
    pub title: String,
    pub release_date: NaiveDate,
    pub text: String,
    pub link: String,
}

/// Fields of a song that does not exist yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub group_id: i64,
    pub title: String,
    pub release_date: NaiveDate,
    pub text: String,
    pub link: String,
}

impl NewSong {
    /// Song with only a group and title; date, text and link left at their zero values
    pub fn bare(group_id: i64, title: impl Into<String>) -> Self {
        Self {
            group_id,
            title: title.into(),
            release_date: zero_date(),
            text: String::new(),
            link: String::new(),
        }
    }
}

/// Song joined with its group name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SongRecord {
    pub id: i64,
    pub group_name: String,
    #[sqlx(rename = "song")]
    pub title: String,
    pub release_date: NaiveDate,
    pub text: String,
    pub link: String,
}
