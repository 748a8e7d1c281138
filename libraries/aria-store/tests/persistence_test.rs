//! Integration tests: library state round-trips through the JSON file backend

use std::sync::Arc;

use aria_core::Song;
use aria_store::{JsonFileStore, LibraryStore};

fn song(id: &str, title: &str) -> Song {
    Song::new(id, title, "Artist")
}

#[tokio::test]
async fn library_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");

    let playlist_id = {
        let store = Arc::new(JsonFileStore::open(&path).await);
        let mut lib = LibraryStore::new(store);
        lib.load().await.unwrap();

        lib.toggle_favorite("fav-1").await;
        lib.record_recently_played(song("s1", "First")).await;
        lib.record_recently_played(song("s2", "Second")).await;
        lib.record_search_term("synthwave").await;

        let playlist = lib.create_playlist("Evening").await.unwrap();
        lib.add_song_to_playlist(&playlist.id, "s1").await.unwrap();
        lib.flush().await.unwrap();
        playlist.id
    };

    // Fresh process: everything comes back
    let store = Arc::new(JsonFileStore::open(&path).await);
    let mut lib = LibraryStore::new(store);
    lib.load().await.unwrap();

    assert!(lib.is_favorite("fav-1"));
    assert_eq!(lib.recently_played().front().unwrap().id, "s2");
    assert_eq!(lib.recently_played().back().unwrap().title, "First");
    assert_eq!(lib.recent_searches().front().unwrap(), "synthwave");

    let playlist = lib.playlist(&playlist_id).unwrap();
    assert_eq!(playlist.name, "Evening");
    assert_eq!(playlist.song_ids, vec!["s1".to_string()]);
}

#[tokio::test]
async fn corrupt_file_degrades_to_empty_library() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    tokio::fs::write(&path, b"\xff\xfenot json at all").await.unwrap();

    let store = Arc::new(JsonFileStore::open(&path).await);
    let mut lib = LibraryStore::new(store);
    lib.load().await.unwrap();

    assert!(lib.favorites().is_empty());
    assert!(lib.playlists().is_empty());
    assert!(lib.recently_played().is_empty());
}
