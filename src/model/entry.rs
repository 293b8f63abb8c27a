use super::{IdentityKey, Song};
use serde::{Deserialize, Serialize};

/// A song annotated with its position in the ranked list
///
/// Serializes flat, so the wire shape is the song's fields plus `rank`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    #[serde(flatten)]
    pub song: Song,

    /// 1-based rank, the only ordering key
    pub rank: u32,
}

impl RankedEntry {
    pub fn new(song: Song, rank: u32) -> Self {
        Self { song, rank }
    }

    pub fn identity_key(&self) -> IdentityKey {
        self.song.identity_key()
    }
}
