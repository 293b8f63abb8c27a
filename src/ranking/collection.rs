//! Rank-keyed song collection with duplicate detection

use super::error::RankingError;
use super::reorder::{reorder, MoveInstruction};
use crate::model::{IdentityKey, RankedEntry, Song};
use std::collections::{BTreeMap, HashSet};

/// The ranked list: rank → entry plus the set of identity keys present
///
/// After every public mutation the ranks are exactly `1..=len()` and the
/// key set holds one key per entry.
#[derive(Debug, Clone, Default)]
pub struct RankedCollection {
    /// Entries indexed by rank (BTreeMap keeps them in rank order)
    entries: BTreeMap<u32, RankedEntry>,

    /// Identity keys of every entry, for O(1) duplicate checks
    keys: HashSet<IdentityKey>,

    /// Upper bound on the list length (None = unbounded)
    max_size: Option<usize>,
}

impl RankedCollection {
    /// Create an empty, unbounded collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the list to `max_size` entries
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Hydrate from persisted entries
    ///
    /// Entries are ordered by their stored rank, later duplicates (by
    /// identity key) are dropped, and survivors are renumbered densely.
    /// Entries beyond `max_size` are discarded.
    pub fn from_entries(entries: Vec<RankedEntry>, max_size: Option<usize>) -> Self {
        let mut sorted = entries;
        sorted.sort_by_key(|e| e.rank);

        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(sorted.len());
        for entry in sorted {
            if !seen.insert(entry.identity_key()) {
                log::debug!("Dropping duplicate persisted entry: {}", entry.identity_key());
                continue;
            }
            kept.push(entry);
        }

        if let Some(max) = max_size {
            if kept.len() > max {
                log::warn!("Persisted list has {} entries, keeping the first {}", kept.len(), max);
                kept.truncate(max);
            }
        }

        let mut collection = Self {
            max_size,
            ..Self::default()
        };
        collection.rebuild(kept);
        collection
    }

    /// Place `song` at `target_rank`, evicting whatever occupied that rank
    ///
    /// `target_rank` may be any occupied rank (overwrite) or `len() + 1`
    /// (append). Returns the evicted occupant, if any.
    pub fn add(&mut self, song: Song, target_rank: u32) -> Result<Option<RankedEntry>, RankingError> {
        let key = song.identity_key();
        if self.keys.contains(&key) {
            return Err(RankingError::DuplicateItem { key });
        }

        self.check_target_rank(target_rank)?;

        let evicted = self.entries.remove(&target_rank);
        if let Some(ref old) = evicted {
            self.keys.remove(&old.identity_key());
            log::debug!("Rank {} replaced: {} - {}", target_rank, old.song.artist, old.song.name);
        }

        self.keys.insert(key);
        self.entries.insert(target_rank, RankedEntry::new(song, target_rank));

        debug_assert!(self.is_consistent());
        Ok(evicted)
    }

    /// Whether a new song could be placed at `target_rank`
    ///
    /// Occupied ranks can always be overwritten; `len() + 1` is accepted
    /// while the list is below its size limit.
    pub fn check_target_rank(&self, target_rank: u32) -> Result<(), RankingError> {
        let size = self.len();
        if target_rank == 0 || target_rank as usize > size + 1 {
            return Err(RankingError::InvalidRank {
                rank: target_rank,
                size,
                max: self.max_size.map_or(size + 1, |m| m.min(size + 1)),
            });
        }
        if let Some(max_size) = self.max_size {
            if target_rank as usize == size + 1 && size >= max_size {
                return Err(RankingError::ListFull { max_size });
            }
        }
        Ok(())
    }

    /// Remove the entry at `rank` and close the gap
    ///
    /// Entries below the removed one move up by one rank. Returns `None`
    /// (and changes nothing) when `rank` is empty.
    pub fn remove(&mut self, rank: u32) -> Option<RankedEntry> {
        let removed = self.entries.remove(&rank)?;
        self.keys.remove(&removed.identity_key());

        let remaining: Vec<RankedEntry> = std::mem::take(&mut self.entries).into_values().collect();
        self.rebuild(remaining);

        Some(removed)
    }

    /// Move an entry and renumber the whole list
    pub fn apply_move(&mut self, instruction: MoveInstruction) -> Result<(), RankingError> {
        let current: Vec<RankedEntry> = self.sorted_entries().cloned().collect();
        let reordered = reorder(&current, instruction)?;
        self.rebuild(reordered);
        Ok(())
    }

    /// Whether a song with this identity key is present
    pub fn has(&self, key: &IdentityKey) -> bool {
        self.keys.contains(key)
    }

    /// Whether `song` (by identity) is present
    pub fn contains_song(&self, song: &Song) -> bool {
        self.has(&song.identity_key())
    }

    pub fn get(&self, rank: u32) -> Option<&RankedEntry> {
        self.entries.get(&rank)
    }

    /// Entries in ascending rank order
    pub fn sorted_entries(&self) -> impl Iterator<Item = &RankedEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    /// Drop every entry (the size limit is kept)
    pub fn clear(&mut self) {
        self.entries.clear();
        self.keys.clear();
    }

    /// Replace the contents with `ordered`, assigning rank = position + 1
    fn rebuild(&mut self, ordered: Vec<RankedEntry>) {
        self.entries.clear();
        self.keys.clear();

        for (index, mut entry) in ordered.into_iter().enumerate() {
            entry.rank = index as u32 + 1;
            self.keys.insert(entry.identity_key());
            self.entries.insert(entry.rank, entry);
        }

        debug_assert!(self.is_consistent());
    }

    /// Dense ranks, rank fields matching their slot, keys in lockstep
    fn is_consistent(&self) -> bool {
        let dense = self
            .entries
            .iter()
            .enumerate()
            .all(|(i, (rank, entry))| *rank == i as u32 + 1 && entry.rank == *rank);

        dense
            && self.keys.len() == self.entries.len()
            && self.entries.values().all(|e| self.keys.contains(&e.identity_key()))
    }
}
