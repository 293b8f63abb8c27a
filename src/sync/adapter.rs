//! Translation between the ranked collection and the song service

use super::config::SyncConfig;
use super::error::SyncError;
use super::traits::SongStore;
use crate::model::{RankedEntry, Song};
use crate::ranking::RankedCollection;
use std::collections::HashSet;

/// Candidates returned for one search, tagged with the rank they are for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    /// Rank a selected candidate should occupy
    pub target_rank: u32,

    /// Candidates in service order, without identity duplicates
    pub songs: Vec<Song>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }
}

/// Loads, saves and searches on behalf of a ranking session
pub struct SyncAdapter<S: SongStore> {
    store: S,
    config: SyncConfig,
}

impl<S: SongStore> SyncAdapter<S> {
    pub fn new(store: S, config: SyncConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Hydrate a collection from the saved list
    ///
    /// Any service failure is logged and yields an empty collection.
    pub async fn load(&self, max_size: Option<usize>) -> RankedCollection {
        match self.store.load().await {
            Ok(entries) => {
                log::info!("Loaded {} saved entries", entries.len());
                RankedCollection::from_entries(entries, max_size)
            }
            Err(e) => {
                log::warn!("Failed to load saved songs, starting empty: {}", e);
                let collection = RankedCollection::new();
                match max_size {
                    Some(max) => collection.with_max_size(max),
                    None => collection,
                }
            }
        }
    }

    /// Persist the collection in rank order
    ///
    /// Refused without contacting the service when the list is shorter than
    /// the configured minimum.
    pub async fn save(&self, collection: &RankedCollection) -> Result<(), SyncError> {
        let minimum = self.config.minimum_list_size;
        if collection.len() < minimum {
            return Err(SyncError::BelowMinimumSize {
                size: collection.len(),
                minimum,
            });
        }

        let entries: Vec<RankedEntry> = collection.sorted_entries().cloned().collect();
        self.store.save(&entries).await.map_err(|e| {
            log::error!("Failed to save {} entries: {}", entries.len(), e);
            e
        })?;

        log::info!("Saved {} entries", entries.len());
        Ok(())
    }

    /// Search the catalog; the collection is not touched
    pub async fn search(&self, query: &str, target_rank: u32) -> Result<SearchResults, SyncError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SyncError::InvalidSearch {
                reason: "query is empty".to_string(),
            });
        }
        if target_rank == 0 {
            return Err(SyncError::InvalidSearch {
                reason: "ranks start at 1".to_string(),
            });
        }

        let found = self.store.search(query, target_rank).await?;
        let total = found.len();

        let mut seen = HashSet::new();
        let songs: Vec<Song> = found
            .into_iter()
            .filter(|s| seen.insert(s.identity_key()))
            .collect();

        log::debug!(
            "Search {:?} for rank {}: {} candidates ({} duplicates dropped)",
            query,
            target_rank,
            songs.len(),
            total - songs.len()
        );

        Ok(SearchResults { target_rank, songs })
    }
}
