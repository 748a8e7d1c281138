//! User library state with write-through persistence

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use tracing::{debug, warn};

use aria_core::{AriaError, KeyValueStore, Playlist, Result, Song};

use crate::keys;

/// Maximum retained recently-played entries
pub const RECENTLY_PLAYED_CAP: usize = 50;

/// Maximum retained recent search terms
pub const RECENT_SEARCHES_CAP: usize = 10;

/// Favorites, playlists, play history, and search history
///
/// All state lives in memory for synchronous reads; every mutation
/// writes through to the backing [`KeyValueStore`]. Persistence
/// failures on mutation are logged and swallowed so a flaky disk never
/// blocks the player, but validation errors (blank names, unknown ids)
/// are returned to the caller.
pub struct LibraryStore {
    store: Arc<dyn KeyValueStore>,
    favorites: HashSet<String>,
    playlists: Vec<Playlist>,
    recently_played: VecDeque<Song>,
    recent_searches: VecDeque<String>,
}

impl LibraryStore {
    /// Create an empty library over the given backend
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            favorites: HashSet::new(),
            playlists: Vec::new(),
            recently_played: VecDeque::new(),
            recent_searches: VecDeque::new(),
        }
    }

    /// Load persisted state from the backend
    ///
    /// Each key degrades independently: a missing or malformed entry
    /// resets that one collection with a warning instead of failing the
    /// whole load.
    pub async fn load(&mut self) -> Result<()> {
        self.favorites = self.load_key(keys::FAVORITES).await;
        self.playlists = self.load_key(keys::PLAYLISTS).await;
        self.recently_played = self.load_key(keys::RECENTLY_PLAYED).await;
        self.recent_searches = self.load_key(keys::RECENT_SEARCHES).await;

        self.recently_played.truncate(RECENTLY_PLAYED_CAP);
        self.recent_searches.truncate(RECENT_SEARCHES_CAP);

        debug!(
            favorites = self.favorites.len(),
            playlists = self.playlists.len(),
            recently_played = self.recently_played.len(),
            "library loaded"
        );
        Ok(())
    }

    async fn load_key<T: serde::de::DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.store.get(key).await {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(key, error = %err, "persisted entry malformed, resetting");
                    T::default()
                }
            },
            Ok(None) => T::default(),
            Err(err) => {
                warn!(key, error = %err, "failed to read persisted entry");
                T::default()
            }
        }
    }

    async fn persist(&self, key: &str, value: serde_json::Value) {
        if let Err(err) = self.store.set(key, value).await {
            warn!(key, error = %err, "failed to persist library entry");
        }
    }

    /// Flush the backend, making all writes durable
    pub async fn flush(&self) -> Result<()> {
        self.store.flush().await
    }

    // --- Favorites ---

    /// Whether a song is favorited
    pub fn is_favorite(&self, song_id: &str) -> bool {
        self.favorites.contains(song_id)
    }

    /// Toggle a song's favorite status, returning the new status
    pub async fn toggle_favorite(&mut self, song_id: &str) -> bool {
        let favorited = if self.favorites.remove(song_id) {
            false
        } else {
            self.favorites.insert(song_id.to_string());
            true
        };

        let mut ids: Vec<&String> = self.favorites.iter().collect();
        ids.sort();
        self.persist(keys::FAVORITES, serde_json::json!(ids)).await;
        favorited
    }

    /// Favorited song ids
    pub fn favorites(&self) -> &HashSet<String> {
        &self.favorites
    }

    /// Favorited songs that appear in the play history, most recent first
    pub fn liked_songs(&self) -> Vec<&Song> {
        self.recently_played
            .iter()
            .filter(|song| self.favorites.contains(&song.id))
            .collect()
    }

    // --- Playlists ---

    /// All playlists, in creation order
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    /// Look up a playlist by id
    pub fn playlist(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    /// Create a playlist, rejecting blank names
    ///
    /// The name is trimmed before validation and storage.
    pub async fn create_playlist(&mut self, name: &str) -> Result<Playlist> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AriaError::InvalidName(name.to_string()));
        }

        let playlist = Playlist::new(name);
        self.playlists.push(playlist.clone());
        self.persist_playlists().await;
        Ok(playlist)
    }

    /// Rename a playlist, rejecting blank names
    pub async fn rename_playlist(&mut self, id: &str, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AriaError::InvalidName(name.to_string()));
        }

        let playlist = self
            .playlists
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AriaError::not_found("playlist", id))?;
        playlist.name = name.to_string();
        self.persist_playlists().await;
        Ok(())
    }

    /// Delete a playlist
    pub async fn delete_playlist(&mut self, id: &str) -> Result<()> {
        let before = self.playlists.len();
        self.playlists.retain(|p| p.id != id);
        if self.playlists.len() == before {
            return Err(AriaError::not_found("playlist", id));
        }
        self.persist_playlists().await;
        Ok(())
    }

    /// Append a song to a playlist (duplicates allowed)
    pub async fn add_song_to_playlist(&mut self, playlist_id: &str, song_id: &str) -> Result<()> {
        let playlist = self
            .playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .ok_or_else(|| AriaError::not_found("playlist", playlist_id))?;
        playlist.song_ids.push(song_id.to_string());
        self.persist_playlists().await;
        Ok(())
    }

    /// Remove the first occurrence of a song from a playlist
    ///
    /// Removing a song the playlist does not contain is a no-op.
    pub async fn remove_song_from_playlist(
        &mut self,
        playlist_id: &str,
        song_id: &str,
    ) -> Result<()> {
        let playlist = self
            .playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .ok_or_else(|| AriaError::not_found("playlist", playlist_id))?;

        if let Some(pos) = playlist.song_ids.iter().position(|id| id == song_id) {
            playlist.song_ids.remove(pos);
            self.persist_playlists().await;
        }
        Ok(())
    }

    async fn persist_playlists(&self) {
        match serde_json::to_value(&self.playlists) {
            Ok(value) => self.persist(keys::PLAYLISTS, value).await,
            Err(err) => warn!(error = %err, "failed to serialize playlists"),
        }
    }

    // --- Recently played ---

    /// Record a song as played, moving it to the front of history
    ///
    /// History is deduplicated by song id and bounded at
    /// [`RECENTLY_PLAYED_CAP`] entries.
    pub async fn record_recently_played(&mut self, song: Song) {
        self.recently_played.retain(|s| s.id != song.id);
        self.recently_played.push_front(song);
        self.recently_played.truncate(RECENTLY_PLAYED_CAP);

        match serde_json::to_value(&self.recently_played) {
            Ok(value) => self.persist(keys::RECENTLY_PLAYED, value).await,
            Err(err) => warn!(error = %err, "failed to serialize play history"),
        }
    }

    /// Play history, most recent first
    pub fn recently_played(&self) -> &VecDeque<Song> {
        &self.recently_played
    }

    // --- Recent searches ---

    /// Record a search term, deduplicating case-insensitively
    ///
    /// Blank terms are ignored. The newest casing wins and history is
    /// bounded at [`RECENT_SEARCHES_CAP`] entries.
    pub async fn record_search_term(&mut self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            return;
        }

        let lowered = term.to_lowercase();
        self.recent_searches.retain(|t| t.to_lowercase() != lowered);
        self.recent_searches.push_front(term.to_string());
        self.recent_searches.truncate(RECENT_SEARCHES_CAP);

        let terms: Vec<&String> = self.recent_searches.iter().collect();
        self.persist(keys::RECENT_SEARCHES, serde_json::json!(terms))
            .await;
    }

    /// Search history, most recent first
    pub fn recent_searches(&self) -> &VecDeque<String> {
        &self.recent_searches
    }
}

impl std::fmt::Debug for LibraryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryStore")
            .field("favorites", &self.favorites.len())
            .field("playlists", &self.playlists.len())
            .field("recently_played", &self.recently_played.len())
            .field("recent_searches", &self.recent_searches.len())
            .finish_non_exhaustive()
    }
}
