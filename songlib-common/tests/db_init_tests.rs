//! Database initialization tests against on-disk SQLite files

use songlib_common::db::groups::find_or_create_group;
use songlib_common::db::init::init_database;
use songlib_common::db::models::NewSong;
use songlib_common::db::songs::{get_song_record, insert_song};

fn database_url(dir: &tempfile::TempDir, name: &str) -> String {
    format!("sqlite://{}", dir.path().join(name).display())
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("songs.db");
    assert!(!db_path.exists());

    let result = init_database(&database_url(&dir, "songs.db")).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_reopen_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let url = database_url(&dir, "songs.db");

    let pool = init_database(&url).await.unwrap();
    let group = find_or_create_group(&pool, "Muse").await.unwrap();
    let id = insert_song(&pool, &NewSong::bare(group.id, "Starlight")).await.unwrap();
    pool.close().await;

    // Second open runs the schema statements again
    let pool = init_database(&url).await.unwrap();
    let record = get_song_record(&pool, id).await.unwrap();

    assert_eq!(record.group_name, "Muse");
    assert_eq!(record.title, "Starlight");
}
