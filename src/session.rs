//! Ranking session controller
//!
//! Owns the ranked collection and the pending search results for one
//! session. Every handler reads, computes and writes the collection
//! synchronously; service calls happen between handlers, so a search is
//! split into [`RankingSession::begin_search`] and
//! [`RankingSession::accept_results`].

use crate::model::{RankedEntry, Song};
use crate::ranking::{MoveInstruction, RankedCollection, RankingError};
use crate::sync::{SearchResults, SongStore, SyncAdapter, SyncError};
use thiserror::Error;

/// Default list length; the list is a fixed-size top N
pub const DEFAULT_LIST_SIZE: usize = 10;

/// Handle for one in-flight search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    sequence: u64,
    pub query: String,
    pub target_rank: u32,
}

impl SearchTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no search results to pick from")]
    NoResults,

    #[error("candidate {index} does not exist ({count} results)")]
    NoSuchCandidate { index: usize, count: usize },

    #[error(transparent)]
    Ranking(#[from] RankingError),
}

/// What happened when a candidate was picked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub rank: u32,
    pub song: Song,

    /// Song previously at `rank`, now dropped from the list
    pub evicted: Option<RankedEntry>,
}

/// Single controller for a ranking session
#[derive(Debug, Default)]
pub struct RankingSession {
    collection: RankedCollection,
    search_sequence: u64,
    results: Option<SearchResults>,
}

impl RankingSession {
    pub fn new(collection: RankedCollection) -> Self {
        Self {
            collection,
            ..Self::default()
        }
    }

    /// Start a session hydrated from the service's saved list
    pub async fn start<S: SongStore>(adapter: &SyncAdapter<S>, max_size: Option<usize>) -> Self {
        Self::new(adapter.load(max_size).await)
    }

    pub fn collection(&self) -> &RankedCollection {
        &self.collection
    }

    pub fn into_collection(self) -> RankedCollection {
        self.collection
    }

    /// Replace the collection with a freshly loaded one, dropping pending results
    pub fn rehydrate(&mut self, collection: RankedCollection) {
        self.collection = collection;
        self.results = None;
    }

    /// Register a new search; earlier tickets become stale
    ///
    /// Ranks no pick could fill are refused here, before any service call,
    /// and leave the current ticket and results untouched.
    pub fn begin_search(&mut self, query: &str, target_rank: u32) -> Result<SearchTicket, RankingError> {
        self.collection.check_target_rank(target_rank)?;

        self.search_sequence += 1;
        Ok(SearchTicket {
            sequence: self.search_sequence,
            query: query.to_string(),
            target_rank,
        })
    }

    /// Apply results if `ticket` is the most recent search
    ///
    /// Returns false (and keeps the current results) for stale tickets.
    pub fn accept_results(&mut self, ticket: &SearchTicket, results: SearchResults) -> bool {
        if ticket.sequence != self.search_sequence {
            log::debug!(
                "Dropping stale results for {:?} (search {} superseded by {})",
                ticket.query,
                ticket.sequence,
                self.search_sequence
            );
            return false;
        }

        self.results = Some(results);
        true
    }

    /// Mark the latest search as failed, clearing any shown results
    pub fn fail_search(&mut self, ticket: &SearchTicket) {
        if ticket.sequence == self.search_sequence {
            self.results = None;
        }
    }

    pub fn pending_results(&self) -> Option<&SearchResults> {
        self.results.as_ref()
    }

    /// Add the candidate at `index` (0-based) at its search's target rank
    ///
    /// On success the pending results are cleared. On a duplicate they are
    /// kept so another candidate can be picked.
    pub fn select(&mut self, index: usize) -> Result<Selection, SessionError> {
        let results = self.results.as_ref().ok_or(SessionError::NoResults)?;
        let song = results
            .songs
            .get(index)
            .cloned()
            .ok_or(SessionError::NoSuchCandidate {
                index,
                count: results.len(),
            })?;
        let rank = results.target_rank;

        let evicted = self.collection.add(song.clone(), rank)?;
        self.results = None;

        log::info!("Ranked #{}: {} - {}", rank, song.artist, song.name);
        Ok(Selection { rank, song, evicted })
    }

    /// Add a song directly at `rank`
    pub fn add(&mut self, song: Song, rank: u32) -> Result<Option<RankedEntry>, RankingError> {
        self.collection.add(song, rank)
    }

    pub fn remove(&mut self, rank: u32) -> Option<RankedEntry> {
        let removed = self.collection.remove(rank);
        if let Some(ref entry) = removed {
            log::info!("Removed #{}: {} - {}", rank, entry.song.artist, entry.song.name);
        }
        removed
    }

    pub fn move_entry(&mut self, instruction: MoveInstruction) -> Result<(), RankingError> {
        self.collection.apply_move(instruction)?;
        log::debug!(
            "Moved #{} {} #{}",
            instruction.from_rank,
            if instruction.insert_before { "above" } else { "below" },
            instruction.to_rank
        );
        Ok(())
    }

    pub fn clear(&mut self) {
        self.collection.clear();
        self.results = None;
    }

    pub async fn save<S: SongStore>(&self, adapter: &SyncAdapter<S>) -> Result<(), SyncError> {
        adapter.save(&self.collection).await
    }
}
