//! Song service integration
//!
//! The search backend and the persistence endpoint are reached through the
//! [`SongStore`] trait. [`HttpSongStore`] talks to the real service,
//! [`MemorySongStore`] serves a local catalog. [`SyncAdapter`] sits between
//! a store and the ranked collection.

mod adapter;
mod config;
mod error;
mod http;
mod memory;
mod traits;

pub use adapter::{SearchResults, SyncAdapter};
pub use config::{SyncConfig, MINIMUM_LIST_SIZE};
pub use error::SyncError;
pub use http::HttpSongStore;
pub use memory::{MemorySongStore, SEARCH_LIMIT};
pub use traits::SongStore;
