//! The sync engine owns the authoritative in-memory entry collection for one
//! session and mediates every read and write through the remote capability,
//! falling back to the local cache when the remote fails.
//!
//! Mutations are optimistic and never rolled back: a remote failure flips the
//! session to offline mode and makes the write durable locally instead. No
//! entry is ever lost to a remote failure; the worst case is a write that is
//! durable locally but not yet remotely. Offline writes are not replayed when
//! connectivity returns — a later successful write flips the mode back to
//! online but resyncs only its own record. That gap is deliberate.

use std::fmt;

use super::cache::LocalCache;
use super::remote::{ListFilter, RemoteStore};
use crate::models::Entry;

/// Whether the most recent remote operation succeeded. Governs whether the
/// local cache is the durable persistence target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    Online,
    Offline,
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncMode::Online => write!(f, "online"),
            SyncMode::Offline => write!(f, "offline"),
        }
    }
}

/// Failure of a sync-engine operation. Remote failures are absorbed into the
/// offline fallback and never surface here; only a caller mistake does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Delete requested without a usable id; rejected before any remote call
    /// or in-memory mutation.
    MissingId,
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::MissingId => write!(f, "delete requires a non-empty id"),
        }
    }
}

impl std::error::Error for SyncError {}

/// Session-scoped engine over an injected remote capability and local cache.
pub struct SyncEngine<R> {
    remote: R,
    cache: LocalCache,
    entries: Vec<Entry>,
    mode: SyncMode,
}

impl<R: RemoteStore> SyncEngine<R> {
    /// Loads the session: adopts the remote collection when the server
    /// answers, otherwise falls back to the cache (or an empty collection)
    /// and starts offline.
    pub async fn initialize(remote: R, cache: LocalCache) -> Self {
        match remote.list(&ListFilter::default()).await {
            Ok(entries) => {
                tracing::debug!("Loaded {} entries from remote", entries.len());
                Self {
                    remote,
                    cache,
                    entries,
                    mode: SyncMode::Online,
                }
            }
            Err(e) => {
                tracing::warn!("Remote unavailable, using local cache: {}", e);
                let entries = match cache.load() {
                    Ok(Some(entries)) => entries,
                    Ok(None) => Vec::new(),
                    Err(e) => {
                        tracing::warn!("Cache unreadable, starting empty: {}", e);
                        Vec::new()
                    }
                };
                Self {
                    remote,
                    cache,
                    entries,
                    mode: SyncMode::Offline,
                }
            }
        }
    }

    /// The authoritative collection, most recently written first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn mode(&self) -> SyncMode {
        self.mode
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Applies the entry to the in-memory collection (replace by id, or
    /// prepend when new), then attempts the remote write. On failure the
    /// session flips offline and the full collection is cached; the in-memory
    /// mutation stands either way.
    pub async fn upsert(&mut self, entry: Entry) -> SyncMode {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry.clone(),
            None => self.entries.insert(0, entry.clone()),
        }

        match self.remote.upsert(&entry).await {
            Ok(()) => self.mode = SyncMode::Online,
            Err(e) => {
                tracing::warn!("Remote write failed, caching locally: {}", e);
                self.mode = SyncMode::Offline;
            }
        }
        self.persist_cache_if_offline();
        self.mode
    }

    /// Removes the entry with the given id from memory, then attempts the
    /// remote delete with the same offline fallback as `upsert`. Removing an
    /// id that is already absent is idempotent.
    pub async fn remove(&mut self, id: &str) -> Result<SyncMode, SyncError> {
        if id.trim().is_empty() {
            return Err(SyncError::MissingId);
        }

        self.entries.retain(|e| e.id != id);

        match self.remote.delete(id).await {
            Ok(()) => self.mode = SyncMode::Online,
            Err(e) => {
                tracing::warn!("Remote delete failed, caching locally: {}", e);
                self.mode = SyncMode::Offline;
            }
        }
        self.persist_cache_if_offline();
        Ok(self.mode)
    }

    /// Deletes every entry, one remote call per id.
    pub async fn clear(&mut self) -> SyncMode {
        let ids: Vec<String> = self.entries.iter().map(|e| e.id.clone()).collect();
        for id in ids {
            // Ids come from the collection, so MissingId cannot fire here.
            let _ = self.remove(&id).await;
        }
        self.mode
    }

    fn persist_cache_if_offline(&self) {
        if self.mode == SyncMode::Offline {
            if let Err(e) = self.cache.save(&self.entries) {
                tracing::error!("Failed to write local cache: {}", e);
            }
        }
    }
}
