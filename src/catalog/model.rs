use serde::{Deserialize, Serialize};

/// A single catalog entry.
///
/// Tracks are never edited in place: they are created by an add, and
/// disappear on delete or reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(
        rename = "durationSec",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_sec: Option<u32>,
}

/// Fields for a track that has not been added yet.
///
/// Only obtainable through [`NewTrack::new`], so a value of this type always
/// carries non-blank title, artist and album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrack {
    title: String,
    artist: String,
    album: String,
    year: Option<i32>,
}

impl NewTrack {
    /// Validate the required fields. Returns `None` when any of them is blank.
    ///
    /// Fields are stored trimmed, and a field of only whitespace counts as
    /// blank. Surrounding spaces typed into the form are therefore not kept.
    pub fn new(title: &str, artist: &str, album: &str, year: Option<i32>) -> Option<Self> {
        let title = title.trim();
        let artist = artist.trim();
        let album = album.trim();
        if title.is_empty() || artist.is_empty() || album.is_empty() {
            return None;
        }

        Some(Self {
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            year,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// Turn the payload into a `Track` carrying the given id.
    pub(crate) fn into_track(self, id: String) -> Track {
        Track {
            id,
            title: self.title,
            artist: self.artist,
            album: self.album,
            year: self.year,
            duration_sec: None,
        }
    }
}
