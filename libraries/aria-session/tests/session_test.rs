//! End-to-end session tests over scripted collaborators

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use aria_core::{AriaError, Result, SearchProvider, Song};
use aria_lyrics::LyricsSource;
use aria_playback::AudioOutput;
use aria_session::Session;
use aria_store::MemoryStore;

/// Scripted audio backend the tests drive by hand
#[derive(Default)]
struct FakeOutputState {
    loaded_url: Option<String>,
    playing: bool,
    position: Duration,
    duration: Option<Duration>,
    finished: bool,
    gain: f32,
    fail_urls: Vec<String>,
}

#[derive(Clone, Default)]
struct FakeOutput(Arc<Mutex<FakeOutputState>>);

impl FakeOutput {
    fn state(&self) -> MutexGuard<'_, FakeOutputState> {
        self.0.lock().unwrap()
    }
}

impl AudioOutput for FakeOutput {
    fn load(&mut self, url: &str) -> std::result::Result<(), aria_playback::OutputError> {
        let mut state = self.0.lock().unwrap();
        if state.fail_urls.iter().any(|u| u == url) {
            return Err("no such stream".into());
        }
        state.loaded_url = Some(url.to_string());
        state.position = Duration::ZERO;
        state.finished = false;
        Ok(())
    }

    fn play(&mut self) {
        self.0.lock().unwrap().playing = true;
    }

    fn pause(&mut self) {
        self.0.lock().unwrap().playing = false;
    }

    fn stop(&mut self) {
        let mut state = self.0.lock().unwrap();
        state.playing = false;
        state.loaded_url = None;
    }

    fn seek(&mut self, position: Duration) {
        self.0.lock().unwrap().position = position;
    }

    fn set_gain(&mut self, gain: f32) {
        self.0.lock().unwrap().gain = gain;
    }

    fn position(&self) -> Duration {
        self.0.lock().unwrap().position
    }

    fn duration(&self) -> Option<Duration> {
        self.0.lock().unwrap().duration
    }

    fn is_finished(&self) -> bool {
        self.0.lock().unwrap().finished
    }
}

/// Lyrics source with canned responses per song id
#[derive(Default)]
struct FakeLyrics {
    by_song: std::collections::HashMap<String, String>,
}

#[async_trait]
impl LyricsSource for FakeLyrics {
    async fn fetch(&self, song_id: &str) -> aria_lyrics::Result<Option<String>> {
        Ok(self.by_song.get(song_id).cloned())
    }
}

struct FakeSearch;

#[async_trait]
impl SearchProvider for FakeSearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Song>> {
        if query == "boom" {
            return Err(AriaError::Other("search backend down".into()));
        }
        Ok((0..limit.min(3))
            .map(|i| Song::new(format!("{query}-{i}"), format!("{query} #{i}"), "Artist"))
            .collect())
    }
}

fn song(id: &str) -> Song {
    let mut song = Song::new(id, format!("Song {id}"), "Artist");
    song.audio_url = format!("https://cdn.test/{id}.mp3");
    song
}

fn session_with(output: FakeOutput) -> Session {
    Session::builder(Box::new(output), Arc::new(MemoryStore::new())).build()
}

#[tokio::test]
async fn play_songs_starts_playback_and_records_history() {
    let output = FakeOutput::default();
    let mut session = session_with(output.clone());

    session
        .play_songs(vec![song("a"), song("b"), song("c")], 1)
        .await
        .unwrap();

    let snapshot = session.snapshot();
    assert!(snapshot.is_playing);
    assert_eq!(snapshot.current_song.as_ref().unwrap().id, "b");
    assert_eq!(snapshot.queue.len(), 3);
    assert_eq!(snapshot.queue_index, Some(1));
    assert_eq!(
        output.state().loaded_url.as_deref(),
        Some("https://cdn.test/b.mp3")
    );

    assert_eq!(session.library().recently_played().front().unwrap().id, "b");
}

#[tokio::test]
async fn toggle_play_pause_cycles() {
    let mut session = session_with(FakeOutput::default());
    session.play_song(song("a")).await.unwrap();

    session.toggle_play_pause().await.unwrap();
    assert!(!session.snapshot().is_playing);

    session.toggle_play_pause().await.unwrap();
    assert!(session.snapshot().is_playing);
}

#[tokio::test]
async fn toggle_play_pause_on_empty_player_is_a_no_op() {
    let mut session = session_with(FakeOutput::default());
    session.toggle_play_pause().await.unwrap();

    let snapshot = session.snapshot();
    assert!(!snapshot.is_playing);
    assert!(snapshot.current_song.is_none());
}

#[tokio::test]
async fn skip_forward_wraps_at_queue_end() {
    let mut session = session_with(FakeOutput::default());
    session.play_songs(vec![song("a"), song("b")], 1).await.unwrap();

    session.skip_forward().await.unwrap();
    assert_eq!(session.snapshot().current_song.unwrap().id, "a");

    session.skip_forward().await.unwrap();
    assert_eq!(session.snapshot().current_song.unwrap().id, "b");
}

#[tokio::test]
async fn skip_backward_restarts_after_threshold() {
    let output = FakeOutput::default();
    let mut session = session_with(output.clone());
    session.play_songs(vec![song("a"), song("b")], 1).await.unwrap();

    // Deep into the song: restart rather than step back
    output.state().position = Duration::from_secs(30);
    session.skip_backward().await.unwrap();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.current_song.as_ref().unwrap().id, "b");
    assert_eq!(snapshot.position, Duration::ZERO);

    // Near the start: step back in the queue
    session.skip_backward().await.unwrap();
    assert_eq!(session.snapshot().current_song.unwrap().id, "a");
}

#[tokio::test]
async fn failing_song_is_skipped_once() {
    let output = FakeOutput::default();
    output
        .state()
        .fail_urls
        .push("https://cdn.test/bad.mp3".to_string());
    let mut session = session_with(output);

    session
        .play_songs(vec![song("bad"), song("good")], 0)
        .await
        .unwrap();

    let snapshot = session.snapshot();
    assert!(snapshot.is_playing);
    assert_eq!(snapshot.current_song.unwrap().id, "good");
}

#[tokio::test]
async fn lone_failing_song_surfaces_the_error() {
    let output = FakeOutput::default();
    output
        .state()
        .fail_urls
        .push("https://cdn.test/bad.mp3".to_string());
    let mut session = session_with(output);

    let err = session.play_song(song("bad")).await.unwrap_err();
    assert!(matches!(err, AriaError::Playback { .. }));
    assert!(!session.snapshot().is_playing);
}

#[tokio::test]
async fn tick_advances_when_a_song_ends() {
    let output = FakeOutput::default();
    let mut session = session_with(output.clone());
    session.play_songs(vec![song("a"), song("b")], 0).await.unwrap();

    session.tick().await.unwrap();
    assert_eq!(session.snapshot().current_song.unwrap().id, "a");

    output.state().finished = true;
    session.tick().await.unwrap();

    let snapshot = session.snapshot();
    assert!(snapshot.is_playing);
    assert_eq!(snapshot.current_song.unwrap().id, "b");
}

#[tokio::test]
async fn volume_and_mute_round_trip() {
    let output = FakeOutput::default();
    let mut session = session_with(output.clone());

    session.set_volume(35);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.volume, 35);
    assert!(!snapshot.is_muted);

    session.toggle_mute();
    let snapshot = session.snapshot();
    assert!(snapshot.is_muted);
    assert_eq!(snapshot.volume, 35);
    assert_eq!(output.state().gain, 0.0);

    session.toggle_mute();
    assert_eq!(session.snapshot().volume, 35);
    assert!(output.state().gain > 0.0);
}

#[tokio::test]
async fn shuffle_keeps_current_song_playing() {
    let mut session = session_with(FakeOutput::default());
    session
        .play_songs(vec![song("a"), song("b"), song("c"), song("d")], 2)
        .await
        .unwrap();

    session.toggle_shuffle();
    let snapshot = session.snapshot();
    assert!(snapshot.is_shuffled);
    assert!(snapshot.is_playing);
    assert_eq!(snapshot.current_song.unwrap().id, "c");

    session.toggle_shuffle();
    assert!(!session.snapshot().is_shuffled);
    assert_eq!(session.snapshot().current_song.unwrap().id, "c");
}

#[tokio::test]
async fn enqueue_into_empty_player_then_play() {
    let mut session = session_with(FakeOutput::default());

    session.enqueue_last(song("a"));
    let snapshot = session.snapshot();
    assert!(!snapshot.is_playing);
    assert_eq!(snapshot.queue.len(), 1);

    session.toggle_play_pause().await.unwrap();
    let snapshot = session.snapshot();
    assert!(snapshot.is_playing);
    assert_eq!(snapshot.current_song.unwrap().id, "a");
}

#[tokio::test]
async fn close_player_stops_but_keeps_queue() {
    let mut session = session_with(FakeOutput::default());
    session.play_songs(vec![song("a"), song("b")], 0).await.unwrap();
    session.toggle_expand_player();

    session.close_player();

    let snapshot = session.snapshot();
    assert!(!snapshot.is_playing);
    assert!(snapshot.current_song.is_none());
    assert!(!snapshot.is_expanded);
    assert_eq!(snapshot.queue.len(), 2);

    // Playback can resume from the retained queue
    session.toggle_play_pause().await.unwrap();
    assert!(session.snapshot().is_playing);
}

#[tokio::test]
async fn lyrics_flow_through_snapshots() {
    let output = FakeOutput::default();
    output.state().duration = Some(Duration::from_secs(40));

    let mut lyrics = FakeLyrics::default();
    lyrics
        .by_song
        .insert("a".to_string(), "one\ntwo\nthree\nfour".to_string());

    let mut session = Session::builder(Box::new(output.clone()), Arc::new(MemoryStore::new()))
        .lyrics_source(Arc::new(lyrics))
        .build();

    session.play_songs(vec![song("a"), song("b")], 0).await.unwrap();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.lyrics.lines.len(), 4);
    assert_eq!(snapshot.lyrics.current_line_index, Some(0));

    // Even-split over 40s: 15s lands in the second line's slice
    output.state().position = Duration::from_secs(15);
    assert_eq!(session.snapshot().lyrics.current_line_index, Some(1));

    // Next song has no lyrics; the old ones must not linger
    session.skip_forward().await.unwrap();
    let snapshot = session.snapshot();
    assert!(snapshot.lyrics.lines.is_empty());
    assert_eq!(snapshot.lyrics.current_line_index, None);
}

#[tokio::test]
async fn search_returns_results_and_records_term() {
    let mut session = Session::builder(
        Box::<FakeOutput>::default(),
        Arc::new(MemoryStore::new()),
    )
    .search_provider(Arc::new(FakeSearch))
    .build();

    let results = session.search("daft punk").await.unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(session.library().recent_searches().front().unwrap(), "daft punk");

    assert!(session.search("boom").await.is_err());
}

#[tokio::test]
async fn download_without_service_errors() {
    let session = session_with(FakeOutput::default());
    assert!(session.download_song(&song("a")).await.is_err());
}

#[tokio::test]
async fn subscribers_receive_snapshots() {
    let mut session = session_with(FakeOutput::default());
    let mut events = session.subscribe();

    session.set_volume(10);

    let snapshot = events.recv().await.unwrap();
    assert_eq!(snapshot.volume, 10);
}

#[tokio::test]
async fn favorites_survive_restore() {
    let store = Arc::new(MemoryStore::new());

    let mut session = Session::builder(Box::<FakeOutput>::default(), store.clone()).build();
    session.restore().await.unwrap();
    assert!(session.toggle_favorite("s1").await);
    session.shutdown().await.unwrap();

    let mut session = Session::builder(Box::<FakeOutput>::default(), store).build();
    session.restore().await.unwrap();
    assert!(session.library().is_favorite("s1"));
}

#[tokio::test]
async fn snapshot_carries_up_next_and_favorite_flag() {
    let mut session = session_with(FakeOutput::default());
    session
        .play_songs(vec![song("a"), song("b"), song("c")], 0)
        .await
        .unwrap();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.up_next.as_ref().unwrap().id, "b");
    assert!(!snapshot.is_current_favorite);

    session.toggle_favorite("a").await;
    assert!(session.snapshot().is_current_favorite);
}

#[tokio::test]
async fn play_queue_entry_jumps() {
    let mut session = session_with(FakeOutput::default());
    session
        .play_songs(vec![song("a"), song("b"), song("c")], 0)
        .await
        .unwrap();

    session.play_queue_entry(2).await.unwrap();
    assert_eq!(session.snapshot().current_song.unwrap().id, "c");
    assert!(session.play_queue_entry(9).await.is_err());
}

#[tokio::test]
async fn removing_the_playing_entry_does_not_skip_its_successor() {
    let output = FakeOutput::default();
    let mut session = session_with(output.clone());
    session
        .play_songs(vec![song("a"), song("b"), song("c")], 0)
        .await
        .unwrap();

    session.remove_queue_entry(0);

    // The removed song keeps playing even though it left the queue
    let snapshot = session.snapshot();
    assert_eq!(snapshot.current_song.as_ref().unwrap().id, "a");
    assert_eq!(snapshot.queue.len(), 2);

    // Its natural end hands playback to the song that took its slot
    output.state().finished = true;
    session.tick().await.unwrap();
    assert_eq!(session.snapshot().current_song.unwrap().id, "b");

    output.state().finished = true;
    session.tick().await.unwrap();
    assert_eq!(session.snapshot().current_song.unwrap().id, "c");
}

#[tokio::test]
async fn removing_the_lone_playing_entry_ends_playback_after_it() {
    let output = FakeOutput::default();
    let mut session = session_with(output.clone());
    session.play_song(song("a")).await.unwrap();

    session.remove_queue_entry(0);
    assert!(session.snapshot().queue.is_empty());
    assert!(session.snapshot().is_playing);

    output.state().finished = true;
    session.tick().await.unwrap();
    assert!(!session.snapshot().is_playing);
}

#[tokio::test]
async fn removing_a_non_current_entry_leaves_advancement_alone() {
    let output = FakeOutput::default();
    let mut session = session_with(output.clone());
    session
        .play_songs(vec![song("a"), song("b"), song("c")], 0)
        .await
        .unwrap();

    session.remove_queue_entry(1);

    output.state().finished = true;
    session.tick().await.unwrap();
    assert_eq!(session.snapshot().current_song.unwrap().id, "c");
}

#[tokio::test]
async fn idle_ticks_publish_nothing() {
    let mut session = session_with(FakeOutput::default());
    session.play_song(song("a")).await.unwrap();

    let mut events = session.subscribe();

    // Nothing changed between these ticks; only the first state lands
    session.tick().await.unwrap();
    session.tick().await.unwrap();
    session.tick().await.unwrap();

    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn playlist_operations_via_facade() {
    let mut session = session_with(FakeOutput::default());

    assert!(session.create_playlist("  ").await.is_err());

    let playlist = session.create_playlist("Focus").await.unwrap();
    session
        .add_song_to_playlist(&playlist.id, "s1")
        .await
        .unwrap();
    assert!(session
        .add_song_to_playlist("missing", "s1")
        .await
        .is_err());

    assert_eq!(
        session.library().playlist(&playlist.id).unwrap().song_ids,
        vec!["s1".to_string()]
    );
}
