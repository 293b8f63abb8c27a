//! In-process song store
//!
//! Serves searches from a fixed catalog and keeps the saved list in
//! memory. Used for offline sessions and as the test double for the
//! HTTP service.

use super::error::SyncError;
use super::traits::SongStore;
use crate::model::{RankedEntry, Song};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Maximum number of candidates returned per search
pub const SEARCH_LIMIT: usize = 10;

/// Catalog-backed store that lives for the duration of the process
#[derive(Debug, Default)]
pub struct MemorySongStore {
    catalog: Vec<Song>,
    saved: Mutex<Vec<RankedEntry>>,
    /// Simulate a dead connection for every call
    offline: AtomicBool,
    search_calls: AtomicUsize,
    load_calls: AtomicUsize,
    save_calls: AtomicUsize,
}

impl MemorySongStore {
    pub fn new(catalog: Vec<Song>) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Read a catalog from a JSON array of songs
    pub fn from_catalog_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {:?}", path))?;
        let catalog: Vec<Song> = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse catalog: {:?}", path))?;

        log::info!("Loaded {} songs from catalog {:?}", catalog.len(), path);
        Ok(Self::new(catalog))
    }

    /// Pre-populate the saved list
    pub fn with_saved(mut self, entries: Vec<RankedEntry>) -> Self {
        *self.saved.get_mut().unwrap_or_else(PoisonError::into_inner) = entries;
        self
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Snapshot of the saved list
    pub fn saved(&self) -> Vec<RankedEntry> {
        self.saved_list().clone()
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), SyncError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(SyncError::Transport {
                message: "connection refused".to_string(),
            });
        }
        Ok(())
    }

    /// Lock the saved list, recovering it if a holder panicked
    fn saved_list(&self) -> MutexGuard<'_, Vec<RankedEntry>> {
        self.saved.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SongStore for MemorySongStore {
    async fn search(&self, query: &str, _target_rank: u32) -> Result<Vec<Song>, SyncError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        let needle = query.to_lowercase();
        Ok(self
            .catalog
            .iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&needle) || s.artist.to_lowercase().contains(&needle)
            })
            .take(SEARCH_LIMIT)
            .cloned()
            .collect())
    }

    async fn load(&self) -> Result<Vec<RankedEntry>, SyncError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        Ok(self.saved_list().clone())
    }

    async fn save(&self, entries: &[RankedEntry]) -> Result<(), SyncError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        *self.saved_list() = entries.to_vec();
        Ok(())
    }
}
