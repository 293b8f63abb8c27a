use crate::model::IdentityKey;
use thiserror::Error;

/// Rejections from the ranked collection and the reorder engine
///
/// Every variant leaves the collection exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankingError {
    #[error("\"{key}\" is already in the list")]
    DuplicateItem { key: IdentityKey },

    #[error("rank {rank} is outside 1..={max} for a list of {size}")]
    InvalidRank { rank: u32, size: usize, max: usize },

    #[error("the list already holds {max_size} songs")]
    ListFull { max_size: usize },

    #[error("cannot move rank {from_rank} to rank {to_rank} in a list of {size}")]
    InvalidMove {
        from_rank: u32,
        to_rank: u32,
        size: usize,
    },
}
