//! Data model for songs and ranked entries
//!
//! These types are shared by the ranking core and the song service
//! wire format.

mod entry;
mod song;

pub use entry::RankedEntry;
pub use song::{IdentityKey, Song};
