//! Song service trait

use super::error::SyncError;
use crate::model::{RankedEntry, Song};
use async_trait::async_trait;

/// Black-box song service - allows swapping between HTTP and in-memory stores
///
/// Implementations only move data; the size precondition on saves and
/// de-duplication of search candidates live in [`super::SyncAdapter`].
#[async_trait]
pub trait SongStore: Send + Sync {
    /// Candidate songs for a text query
    ///
    /// `target_rank` is forwarded for services that echo it back; it does
    /// not affect which songs match.
    async fn search(&self, query: &str, target_rank: u32) -> Result<Vec<Song>, SyncError>;

    /// Previously saved entries
    async fn load(&self) -> Result<Vec<RankedEntry>, SyncError>;

    /// Replace the saved list with `entries` (all-or-nothing)
    async fn save(&self, entries: &[RankedEntry]) -> Result<(), SyncError>;
}
