//! Single-song lifecycle: create with enrichment, read lyrics, partial update, delete

use songlib_common::db::groups::find_or_create_group;
use songlib_common::db::models::{parse_date, NewSong, SongRecord};
use songlib_common::db::songs;
use songlib_common::verses::select_verse;
use songlib_common::{Error, Result};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::models::UpdateSongRequest;
use crate::services::lookup_client::{SongInfo, SongInfoClient};

/// Create a song, resolving its group and enriching it from the lookup service
///
/// A failed lookup does not block creation; the song is stored with an empty
/// text and link and the zero release date. A lookup that succeeds but
/// carries an unparseable release date is an internal error.
pub async fn create_song(
    pool: &SqlitePool,
    lookup: &SongInfoClient,
    group_name: &str,
    title: &str,
) -> Result<SongRecord> {
    let group = find_or_create_group(pool, group_name).await?;
    let mut song = NewSong::bare(group.id, title);

    match lookup.fetch_song_info(group_name, title).await {
        Ok(info) => apply_song_info(&mut song, info)?,
        Err(e) => warn!(group = group_name, song = title, "Song info not available: {}", e),
    }

    let id = songs::insert_song(pool, &song).await?;
    info!(song_id = id, group = group_name, song = title, "Song created");

    Ok(SongRecord {
        id,
        group_name: group.name,
        title: song.title,
        release_date: song.release_date,
        text: song.text,
        link: song.link,
    })
}

fn apply_song_info(song: &mut NewSong, info: SongInfo) -> Result<()> {
    if !info.release_date.is_empty() {
        song.release_date = parse_date(&info.release_date).ok_or_else(|| {
            Error::Internal(format!(
                "lookup service returned malformed releaseDate {:?}",
                info.release_date
            ))
        })?;
    }
    song.text = info.text;
    song.link = info.link;
    Ok(())
}

/// Full lyrics of a song, or one 1-indexed verse
///
/// A song without lyrics is reported as not found. An empty `verse` is
/// treated as absent.
pub async fn read_song_text(pool: &SqlitePool, id: i64, verse: Option<&str>) -> Result<String> {
    let song = songs::get_song(pool, id).await?;

    if song.text.is_empty() {
        return Err(Error::NotFound(format!("text of song {}", id)));
    }

    match verse.filter(|v| !v.is_empty()) {
        Some(verse) => Ok(select_verse(&song.text, verse)?.to_string()),
        None => Ok(song.text),
    }
}

/// Apply the supplied, non-empty fields of `changes` to a song
///
/// The release date is validated before anything is written, so a bad date
/// leaves both the song and the groups table untouched.
pub async fn update_song(
    pool: &SqlitePool,
    id: i64,
    changes: &UpdateSongRequest,
) -> Result<SongRecord> {
    let mut song = songs::get_song(pool, id).await?;

    let release_date = match supplied(&changes.release_date) {
        Some(raw) => Some(parse_date(raw).ok_or_else(|| {
            Error::InvalidInput(format!(
                "Invalid releaseDate {:?}, expected YYYY-MM-DD",
                raw
            ))
        })?),
        None => None,
    };

    if let Some(group_name) = supplied(&changes.group) {
        song.group_id = find_or_create_group(pool, group_name).await?.id;
    }
    if let Some(title) = supplied(&changes.song) {
        song.title = title.to_string();
    }
    if let Some(date) = release_date {
        song.release_date = date;
    }
    if let Some(text) = supplied(&changes.text) {
        song.text = text.to_string();
    }
    if let Some(link) = supplied(&changes.link) {
        song.link = link.to_string();
    }

    songs::save_song(pool, &song).await?;
    info!(song_id = id, "Song updated");

    songs::get_song_record(pool, id).await
}

fn supplied(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.is_empty())
}

/// Delete a song by id
pub async fn delete_song(pool: &SqlitePool, id: i64) -> Result<()> {
    songs::delete_song(pool, id).await?;
    info!(song_id = id, "Song deleted");
    Ok(())
}
