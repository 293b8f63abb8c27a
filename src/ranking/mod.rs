//! Ranked list state engine
//!
//! Holds rank → song assignments, rejects duplicates by identity key and
//! renumbers the list after removals and moves so ranks stay dense.

mod collection;
mod error;
mod reorder;

pub use collection::RankedCollection;
pub use error::RankingError;
pub use reorder::{reorder, MoveInstruction};
