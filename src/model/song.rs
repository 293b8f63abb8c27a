use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog song as returned by the search service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Track title
    pub name: String,

    /// Primary artist name
    pub artist: String,

    /// Catalog URI (e.g. spotify:track:...), empty when the service omits it
    #[serde(default)]
    pub uri: String,

    /// Album artwork URL
    #[serde(default)]
    pub album_cover_url: String,
}

/// Duplicate-detection key for a song
///
/// Built from the exact name followed by the exact artist, with no
/// separator and no case folding. Artwork and URI play no part, so two
/// releases of the same title by the same artist collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Song {
    /// Create a song with no URI or artwork
    pub fn new(name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
            uri: String::new(),
            album_cover_url: String::new(),
        }
    }

    /// Set the album artwork URL
    pub fn with_artwork(mut self, url: impl Into<String>) -> Self {
        self.album_cover_url = url.into();
        self
    }

    /// Set the catalog URI
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    /// Identity key used for duplicate detection
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey(format!("{}{}", self.name, self.artist))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_ignores_artwork() {
        let a = Song::new("Breathe", "Telepopmusik").with_artwork("https://img/1.jpg");
        let b = Song::new("Breathe", "Telepopmusik").with_artwork("https://img/2.jpg");
        assert_eq!(a.identity_key(), b.identity_key());
    }

    #[test]
    fn test_identity_is_case_sensitive() {
        let a = Song::new("Breathe", "Telepopmusik");
        let b = Song::new("breathe", "Telepopmusik");
        assert_ne!(a.identity_key(), b.identity_key());
    }

    #[test]
    fn test_identity_is_plain_concatenation() {
        let song = Song::new("Heroes", "David Bowie");
        assert_eq!(song.identity_key().as_str(), "HeroesDavid Bowie");
    }

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        let json = r#"{"key":"xy","name":"x","artist":"y","uri":"spotify:track:1","album_cover_url":"u","rank":3}"#;
        let song: Song = serde_json::from_str(json).unwrap();
        assert_eq!(song.name, "x");
        assert_eq!(song.uri, "spotify:track:1");
    }
}
