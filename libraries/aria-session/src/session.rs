//! The session facade driving queue, transport, library, and lyrics

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use aria_core::{AriaError, DownloadService, KeyValueStore, Playlist, Result, SearchProvider, Song};
use aria_lyrics::{Lyrics, LyricsSource, LyricsState};
use aria_playback::{AudioOutput, Queue, Transport, TransportState};
use aria_store::LibraryStore;

use crate::snapshot::PlayerSnapshot;

/// Up to this playhead position, "previous" steps back in the queue;
/// past it, it restarts the current song
const RESTART_THRESHOLD: Duration = Duration::from_secs(3);

/// Snapshot channel capacity; slow subscribers drop old snapshots
const EVENT_CAPACITY: usize = 64;

/// Default result count for [`Session::search`]
const SEARCH_LIMIT: usize = 25;

/// Builder for [`Session`]
///
/// The output and store are mandatory; lyrics, search, and download
/// collaborators are optional and their operations degrade gracefully
/// when absent.
pub struct SessionBuilder {
    output: Box<dyn AudioOutput>,
    store: Arc<dyn KeyValueStore>,
    lyrics_source: Option<Arc<dyn LyricsSource>>,
    search_provider: Option<Arc<dyn SearchProvider>>,
    download_service: Option<Arc<dyn DownloadService>>,
}

impl SessionBuilder {
    /// Attach a lyrics provider
    pub fn lyrics_source(mut self, source: Arc<dyn LyricsSource>) -> Self {
        self.lyrics_source = Some(source);
        self
    }

    /// Attach a search backend
    pub fn search_provider(mut self, provider: Arc<dyn SearchProvider>) -> Self {
        self.search_provider = Some(provider);
        self
    }

    /// Attach a download service
    pub fn download_service(mut self, service: Arc<dyn DownloadService>) -> Self {
        self.download_service = Some(service);
        self
    }

    /// Build the session
    pub fn build(self) -> Session {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Session {
            library: LibraryStore::new(self.store),
            queue: Queue::new(),
            transport: Transport::new(self.output),
            lyrics_source: self.lyrics_source,
            search_provider: self.search_provider,
            download_service: self.download_service,
            lyrics: None,
            lyrics_song_id: None,
            lyrics_loading: false,
            is_expanded: false,
            show_lyrics: false,
            current_entry_removed: false,
            events,
            last_published: None,
        }
    }
}

/// The playback session: one facade over the whole engine
///
/// Every user gesture maps to one method here. Methods mutate state,
/// then publish a [`PlayerSnapshot`] to all subscribers.
pub struct Session {
    library: LibraryStore,
    queue: Queue,
    transport: Transport,

    lyrics_source: Option<Arc<dyn LyricsSource>>,
    search_provider: Option<Arc<dyn SearchProvider>>,
    download_service: Option<Arc<dyn DownloadService>>,

    /// Lyrics for `lyrics_song_id`; ignored once the song changes
    lyrics: Option<Lyrics>,
    lyrics_song_id: Option<String>,
    lyrics_loading: bool,

    is_expanded: bool,
    show_lyrics: bool,

    /// The transport's song was removed from the queue; `current` now
    /// holds its successor, so the next advance must not step again
    current_entry_removed: bool,

    events: broadcast::Sender<PlayerSnapshot>,

    /// Last published snapshot, so idle ticks stay silent
    last_published: Option<PlayerSnapshot>,
}

impl Session {
    /// Start building a session over an output and a persistence backend
    pub fn builder(output: Box<dyn AudioOutput>, store: Arc<dyn KeyValueStore>) -> SessionBuilder {
        SessionBuilder {
            output,
            store,
            lyrics_source: None,
            search_provider: None,
            download_service: None,
        }
    }

    /// Load persisted library state
    ///
    /// Call once at startup, before the first user gesture.
    pub async fn restore(&mut self) -> Result<()> {
        self.library.load().await?;
        info!("session restored");
        self.emit();
        Ok(())
    }

    /// Flush persistence and release the audio output
    pub async fn shutdown(&mut self) -> Result<()> {
        self.transport.stop();
        self.library.flush().await?;
        info!("session shut down");
        Ok(())
    }

    /// Subscribe to player snapshots
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerSnapshot> {
        self.events.subscribe()
    }

    /// Current state as a snapshot, without publishing
    pub fn snapshot(&self) -> PlayerSnapshot {
        let current_song = self.transport.current_song().cloned();
        let state = self.transport.state();
        debug_assert!(!state.is_playing() || current_song.is_some());

        let lyrics = if self.lyrics_loading {
            LyricsState::loading()
        } else {
            match (&self.lyrics, &current_song) {
                (Some(lyrics), Some(song))
                    if self.lyrics_song_id.as_deref() == Some(song.id.as_str()) =>
                {
                    LyricsState::at_position(
                        lyrics,
                        self.transport.position(),
                        self.transport.duration(),
                    )
                }
                _ => LyricsState::unavailable(),
            }
        };

        let volume = self.transport.volume();
        PlayerSnapshot {
            is_current_favorite: current_song
                .as_ref()
                .is_some_and(|song| self.library.is_favorite(&song.id)),
            current_song,
            is_playing: state.is_playing(),
            position: self.transport.position(),
            duration: self.transport.duration(),
            volume: volume.level(),
            is_muted: volume.is_muted(),
            is_shuffled: self.queue.is_shuffled(),
            queue: self.queue.songs_in_effective_order().into_iter().cloned().collect(),
            queue_index: self.queue.current_index(),
            up_next: if self.queue.len() > 1 {
                self.queue.peek_next().cloned()
            } else {
                None
            },
            is_expanded: self.is_expanded,
            show_lyrics: self.show_lyrics,
            lyrics,
        }
    }

    /// Read-only access to the user library
    pub fn library(&self) -> &LibraryStore {
        &self.library
    }

    // --- Playback ---

    /// Replace the queue with a collection and start playing at `start_index`
    pub async fn play_songs(&mut self, songs: Vec<Song>, start_index: usize) -> Result<()> {
        self.queue.set_queue(songs, start_index);
        self.start_current().await
    }

    /// Play a single song as a one-song queue
    pub async fn play_song(&mut self, song: Song) -> Result<()> {
        self.play_songs(vec![song], 0).await
    }

    /// Toggle between playing and paused
    ///
    /// With a queued song but nothing bound yet (e.g. after enqueueing
    /// into an empty player), starts playback; with an empty player the
    /// gesture is a no-op.
    pub async fn toggle_play_pause(&mut self) -> Result<()> {
        match self.transport.state() {
            TransportState::Playing => {
                self.transport.pause();
                self.emit();
                Ok(())
            }
            TransportState::Ready | TransportState::Paused | TransportState::Ended => {
                self.transport.play()?;
                self.emit();
                Ok(())
            }
            TransportState::Idle | TransportState::Loading => {
                if self.queue.current_song().is_some() {
                    self.start_current().await
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Skip to the next song in the queue (wraps at the end)
    pub async fn skip_forward(&mut self) -> Result<()> {
        if self.current_entry_removed {
            // The current slot already holds the removed song's
            // successor; stepping again would skip it
            self.current_entry_removed = false;
            if self.queue.current_song().is_none() {
                return Ok(());
            }
            return self.start_current().await;
        }

        if self.queue.next().is_none() {
            return Ok(());
        }
        self.start_current().await
    }

    /// Restart the current song, or step back in the queue
    ///
    /// Within the first [`RESTART_THRESHOLD`] of a song this steps to
    /// the previous queue entry (wrapping at the start); later it
    /// restarts the current song from the top.
    pub async fn skip_backward(&mut self) -> Result<()> {
        if self.transport.current_song().is_some()
            && self.transport.position() > RESTART_THRESHOLD
        {
            self.transport.seek(Duration::ZERO)?;
            self.emit();
            return Ok(());
        }

        if self.queue.previous().is_none() {
            return Ok(());
        }
        self.start_current().await
    }

    /// Seek within the current song
    pub fn seek(&mut self, position: Duration) -> Result<()> {
        self.transport.seek(position)?;
        self.emit();
        Ok(())
    }

    /// Set the volume level (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.transport.set_volume(level);
        self.emit();
    }

    /// Toggle mute, preserving the volume level
    pub fn toggle_mute(&mut self) {
        self.transport.toggle_mute();
        self.emit();
    }

    /// Toggle shuffle; the current song keeps playing either way
    pub fn toggle_shuffle(&mut self) {
        self.queue.toggle_shuffle();
        self.emit();
    }

    /// Stop playback and dismiss the player surface
    ///
    /// The queue is kept so playback can resume where it left off.
    pub fn close_player(&mut self) {
        self.transport.stop();
        self.lyrics = None;
        self.lyrics_song_id = None;
        self.lyrics_loading = false;
        self.current_entry_removed = false;
        self.is_expanded = false;
        self.emit();
    }

    /// Periodic drive: settle seeks, advance on end-of-song, publish
    ///
    /// Hosts call this a few times per second. A tick that changes
    /// nothing publishes nothing.
    pub async fn tick(&mut self) -> Result<()> {
        if self.transport.poll() {
            debug!("song ended, advancing queue");
            return self.skip_forward().await;
        }

        let snapshot = self.snapshot();
        if self.last_published.as_ref() != Some(&snapshot) {
            self.last_published = Some(snapshot.clone());
            let _ = self.events.send(snapshot);
        }
        Ok(())
    }

    // --- Queue ---

    /// Queue a song to play right after the current one
    pub fn enqueue_next(&mut self, song: Song) {
        self.queue.enqueue_next(song);
        self.emit();
    }

    /// Queue a song at the end
    pub fn enqueue_last(&mut self, song: Song) {
        self.queue.enqueue_last(song);
        self.emit();
    }

    /// Play a specific entry of the queue (effective order)
    pub async fn play_queue_entry(&mut self, index: usize) -> Result<()> {
        self.queue.jump_to(index).map_err(AriaError::from)?;
        self.start_current().await
    }

    /// Remove a queue entry (effective order)
    ///
    /// Removing the entry that is currently playing keeps it playing;
    /// when it ends, playback continues with the song that took its
    /// place in the queue.
    pub fn remove_queue_entry(&mut self, index: usize) {
        let removing_current = self.queue.current_index() == Some(index);
        if let Some(removed) = self.queue.remove(index) {
            if removing_current
                && self
                    .transport
                    .current_song()
                    .is_some_and(|song| song.same_track(&removed))
            {
                self.current_entry_removed = true;
            }
        }
        self.emit();
    }

    // --- UI surfaces ---

    /// Toggle the full-screen player
    pub fn toggle_expand_player(&mut self) {
        self.is_expanded = !self.is_expanded;
        self.emit();
    }

    /// Toggle the lyrics panel
    pub fn toggle_lyrics_view(&mut self) {
        self.show_lyrics = !self.show_lyrics;
        self.emit();
    }

    // --- Library ---

    /// Toggle a song's favorite status, returning the new status
    pub async fn toggle_favorite(&mut self, song_id: &str) -> bool {
        let favorited = self.library.toggle_favorite(song_id).await;
        self.emit();
        favorited
    }

    /// Create a playlist, rejecting blank names
    pub async fn create_playlist(&mut self, name: &str) -> Result<Playlist> {
        self.library.create_playlist(name).await
    }

    /// Append a song to a playlist
    pub async fn add_song_to_playlist(&mut self, playlist_id: &str, song_id: &str) -> Result<()> {
        self.library.add_song_to_playlist(playlist_id, song_id).await
    }

    /// Remove the first occurrence of a song from a playlist
    pub async fn remove_song_from_playlist(
        &mut self,
        playlist_id: &str,
        song_id: &str,
    ) -> Result<()> {
        self.library
            .remove_song_from_playlist(playlist_id, song_id)
            .await
    }

    /// Rename a playlist, rejecting blank names
    pub async fn rename_playlist(&mut self, playlist_id: &str, name: &str) -> Result<()> {
        self.library.rename_playlist(playlist_id, name).await
    }

    /// Delete a playlist
    pub async fn delete_playlist(&mut self, playlist_id: &str) -> Result<()> {
        self.library.delete_playlist(playlist_id).await
    }

    /// Record a search term in history
    pub async fn record_search_term(&mut self, term: &str) {
        self.library.record_search_term(term).await;
    }

    /// Search songs via the configured provider, recording the term
    pub async fn search(&mut self, query: &str) -> Result<Vec<Song>> {
        let provider = self
            .search_provider
            .as_ref()
            .ok_or_else(|| AriaError::Other("no search provider configured".into()))?
            .clone();

        let results = provider.search(query, SEARCH_LIMIT).await?;
        self.library.record_search_term(query).await;
        Ok(results)
    }

    /// Trigger a download of a song via the configured service
    pub async fn download_song(&self, song: &Song) -> Result<()> {
        let service = self
            .download_service
            .as_ref()
            .ok_or_else(|| AriaError::Other("no download service configured".into()))?;
        service.download(song).await
    }

    // --- Internals ---

    /// Bind and start the queue's current song
    ///
    /// A song whose source fails is skipped once with a warning; a
    /// second consecutive failure is returned to the caller.
    async fn start_current(&mut self) -> Result<()> {
        self.current_entry_removed = false;
        let mut retried = false;
        loop {
            let Some(song) = self.queue.current_song().cloned() else {
                self.transport.stop();
                self.emit();
                return Ok(());
            };

            match self.transport.load(song.clone()) {
                Ok(()) => {
                    self.transport.play()?;
                    break;
                }
                Err(err) if !retried && self.queue.len() > 1 => {
                    warn!(song_id = %song.id, error = %err, "song failed, skipping to next");
                    retried = true;
                    self.queue.next();
                }
                Err(err) => {
                    self.emit();
                    return Err(err.into());
                }
            }
        }

        let song = match self.transport.current_song().cloned() {
            Some(song) => song,
            None => return Ok(()),
        };
        self.library.record_recently_played(song.clone()).await;
        self.emit();

        self.refresh_lyrics(&song).await;
        self.emit();
        Ok(())
    }

    /// Fetch and parse lyrics for `song`
    ///
    /// The result is tagged with the song id; a snapshot only surfaces
    /// it while that song is still current, so stale fetches can never
    /// label the wrong song.
    async fn refresh_lyrics(&mut self, song: &Song) {
        self.lyrics = None;
        self.lyrics_song_id = None;

        let Some(source) = self.lyrics_source.clone() else {
            return;
        };

        self.lyrics_loading = true;
        self.emit();

        match source.fetch(&song.id).await {
            Ok(Some(raw)) => {
                let lyrics = Lyrics::parse(&raw);
                if !lyrics.is_empty() {
                    self.lyrics = Some(lyrics);
                    self.lyrics_song_id = Some(song.id.clone());
                }
            }
            Ok(None) => {}
            Err(err) => {
                warn!(song_id = %song.id, error = %err, "lyrics fetch failed");
            }
        }
        self.lyrics_loading = false;
    }

    fn emit(&mut self) {
        // No subscribers is fine; snapshots are fire-and-forget
        let snapshot = self.snapshot();
        self.last_published = Some(snapshot.clone());
        let _ = self.events.send(snapshot);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("queue_len", &self.queue.len())
            .field("transport", &self.transport)
            .field("is_expanded", &self.is_expanded)
            .field("show_lyrics", &self.show_lyrics)
            .finish_non_exhaustive()
    }
}
