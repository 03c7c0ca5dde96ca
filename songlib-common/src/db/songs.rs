//! Single-song persistence: read, insert, overwrite, delete

use crate::db::models::{NewSong, Song, SongRecord};
use crate::{Error, Result};
use sqlx::SqlitePool;
use tracing::debug;

/// Columns selected for a [`SongRecord`], aliased for the `songs s JOIN groups g` join
pub(crate) const SONG_RECORD_COLUMNS: &str =
    "s.id, g.name AS group_name, s.song, s.release_date, s.text, s.link";

/// Load a song row by id
///
/// Returns [`Error::NotFound`] when no row has this id.
pub async fn get_song(pool: &SqlitePool, id: i64) -> Result<Song> {
    sqlx::query_as::<_, Song>(
        "SELECT id, group_id, song, release_date, text, link FROM songs WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::song_not_found(id))
}

/// Load a song joined with its group name
pub async fn get_song_record(pool: &SqlitePool, id: i64) -> Result<SongRecord> {
    let sql = format!(
        "SELECT {} FROM songs s JOIN groups g ON g.id = s.group_id WHERE s.id = ?",
        SONG_RECORD_COLUMNS
    );

    sqlx::query_as::<_, SongRecord>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::song_not_found(id))
}

/// Insert a song and return its store-assigned id
pub async fn insert_song(pool: &SqlitePool, song: &NewSong) -> Result<i64> {
    let id = sqlx::query(
        "INSERT INTO songs (group_id, song, release_date, text, link) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(song.group_id)
    .bind(&song.title)
    .bind(song.release_date)
    .bind(&song.text)
    .bind(&song.link)
    .execute(pool)
    .await?
    .last_insert_rowid();

    debug!(song_id = id, group_id = song.group_id, "Song inserted");
    Ok(id)
}

/// Overwrite every column of an existing song
pub async fn save_song(pool: &SqlitePool, song: &Song) -> Result<()> {
    let affected = sqlx::query(
        "UPDATE songs
         SET group_id = ?, song = ?, release_date = ?, text = ?, link = ?
         WHERE id = ?",
    )
    .bind(song.group_id)
    .bind(&song.title)
    .bind(song.release_date)
    .bind(&song.text)
    .bind(&song.link)
    .bind(song.id)
    .execute(pool)
    .await?
    .rows_affected();

    if affected == 0 {
        return Err(Error::song_not_found(song.id));
    }

    debug!(song_id = song.id, "Song saved");
    Ok(())
}

/// Delete a song by id
///
/// Returns [`Error::NotFound`] when nothing was deleted. The song's group is
/// left in place.
pub async fn delete_song(pool: &SqlitePool, id: i64) -> Result<()> {
    let affected = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    if affected == 0 {
        return Err(Error::song_not_found(id));
    }

    debug!(song_id = id, "Song deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::groups::find_or_create_group;
    use crate::db::init_memory_database;
    use crate::db::models::zero_date;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_insert_and_read_back() {
        let pool = init_memory_database().await.unwrap();
        let group = find_or_create_group(&pool, "Muse").await.unwrap();

        let new_song = NewSong {
            group_id: group.id,
            title: "Supermassive Black Hole".to_string(),
            release_date: NaiveDate::from_ymd_opt(2006, 7, 16).unwrap(),
            text: "Ooh baby\n\nOoh".to_string(),
            link: "https://example.com/watch".to_string(),
        };
        let id = insert_song(&pool, &new_song).await.unwrap();

        let song = get_song(&pool, id).await.unwrap();
        assert_eq!(song.group_id, group.id);
        assert_eq!(song.title, new_song.title);
        assert_eq!(song.release_date, new_song.release_date);

        let record = get_song_record(&pool, id).await.unwrap();
        assert_eq!(record.group_name, "Muse");
        assert_eq!(record.text, "Ooh baby\n\nOoh");
    }

    #[tokio::test]
    async fn test_bare_song_keeps_zero_date() {
        let pool = init_memory_database().await.unwrap();
        let group = find_or_create_group(&pool, "Muse").await.unwrap();

        let id = insert_song(&pool, &NewSong::bare(group.id, "Starlight")).await.unwrap();

        let song = get_song(&pool, id).await.unwrap();
        assert_eq!(song.release_date, zero_date());
    }

    #[tokio::test]
    async fn test_missing_song_is_not_found() {
        let pool = init_memory_database().await.unwrap();

        assert!(matches!(get_song(&pool, 42).await, Err(Error::NotFound(_))));
        assert!(matches!(get_song_record(&pool, 42).await, Err(Error::NotFound(_))));
        assert!(matches!(delete_song(&pool, 42).await, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_save_overwrites_all_columns() {
        let pool = init_memory_database().await.unwrap();
        let muse = find_or_create_group(&pool, "Muse").await.unwrap();
        let queen = find_or_create_group(&pool, "Queen").await.unwrap();
        let id = insert_song(&pool, &NewSong::bare(muse.id, "Starlight")).await.unwrap();

        let mut song = get_song(&pool, id).await.unwrap();
        song.group_id = queen.id;
        song.title = "Bohemian Rhapsody".to_string();
        song.link = "https://example.com/br".to_string();
        save_song(&pool, &song).await.unwrap();

        assert_eq!(get_song(&pool, id).await.unwrap(), song);
    }

    #[tokio::test]
    async fn test_delete_leaves_group() {
        let pool = init_memory_database().await.unwrap();
        let group = find_or_create_group(&pool, "Muse").await.unwrap();
        let id = insert_song(&pool, &NewSong::bare(group.id, "Starlight")).await.unwrap();

        delete_song(&pool, id).await.unwrap();

        assert!(matches!(get_song(&pool, id).await, Err(Error::NotFound(_))));
        let groups: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM groups")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(groups, 1);
    }
}
