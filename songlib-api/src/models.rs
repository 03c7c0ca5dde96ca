//! Request and response bodies

use serde::{Deserialize, Serialize};
use songlib_common::db::models::{format_date, SongRecord};

/// Song as returned by every song endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongResponse {
    pub id: i64,
    pub group: String,
    pub song: String,
    /// `YYYY-MM-DD`; `0001-01-01` when unknown
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    pub text: String,
    pub link: String,
}

impl From<SongRecord> for SongResponse {
    fn from(record: SongRecord) -> Self {
        Self {
            id: record.id,
            group: record.group_name,
            song: record.title,
            release_date: format_date(record.release_date),
            text: record.text,
            link: record.link,
        }
    }
}

/// POST /songs body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateSongRequest {
    pub group: String,
    pub song: String,
}

/// PUT /songs/:id body
///
/// Absent and empty fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateSongRequest {
    pub group: Option<String>,
    pub song: Option<String>,
    #[serde(rename = "releaseDate")]
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

/// Query parameters for GET /songs/:id/text
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextQuery {
    /// 1-indexed verse number; whole text when absent
    pub verse: Option<String>,
}

/// Lyrics or a single verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextResponse {
    pub text: String,
}

/// Plain confirmation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use songlib_common::db::models::zero_date;

    #[test]
    fn test_song_response_json_shape() {
        let record = SongRecord {
            id: 4,
            group_name: "Muse".to_string(),
            title: "Starlight".to_string(),
            release_date: zero_date(),
            text: String::new(),
            link: String::new(),
        };

        let json = serde_json::to_value(SongResponse::from(record)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 4,
                "group": "Muse",
                "song": "Starlight",
                "releaseDate": "0001-01-01",
                "text": "",
                "link": ""
            })
        );
    }

    #[test]
    fn test_update_request_distinguishes_absent_fields() {
        let req: UpdateSongRequest =
            serde_json::from_str(r#"{"song": "New title", "link": null, "text": ""}"#).unwrap();
        assert_eq!(req.song.as_deref(), Some("New title"));
        assert_eq!(req.link, None);
        assert_eq!(req.text.as_deref(), Some(""));
        assert_eq!(req.group, None);
    }
}
