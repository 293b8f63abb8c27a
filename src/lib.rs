//! Song Ranker - build and persist a ranked top-N song list
//!
//! This library keeps a dense, duplicate-free ranked list of catalog
//! songs, reorders it with list-splice semantics, and syncs it with a
//! song search/persistence service.

pub mod command;
pub mod model;
pub mod ranking;
pub mod session;
pub mod sync;

pub use ranking::{MoveInstruction, RankedCollection, RankingError};
pub use session::RankingSession;
pub use sync::{SyncAdapter, SyncConfig, SyncError};
