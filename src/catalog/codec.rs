//! Payload format for the persisted catalog.
//!
//! Current format: `{"version": 1, "tracks": [...]}`. Payloads written before
//! the version field existed are a bare JSON array of tracks; they are still
//! accepted and reported as migrated so the caller can rewrite them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::Track;

/// Version written by [`encode`].
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed catalog payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported catalog schema version {found} (expected {})", SCHEMA_VERSION)]
    UnsupportedVersion { found: u32 },
    #[error("duplicate track id {0:?}")]
    DuplicateId(String),
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    tracks: &'a [Track],
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    tracks: Vec<Track>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPayload {
    Versioned(Envelope),
    Legacy(Vec<Track>),
}

/// Result of a successful [`decode`].
#[derive(Debug)]
pub struct Decoded {
    pub tracks: Vec<Track>,
    /// Set when the payload used the unversioned layout.
    pub migrated: bool,
}

/// Serialize the full catalog into the current payload format.
pub fn encode(tracks: &[Track]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&EnvelopeRef {
        version: SCHEMA_VERSION,
        tracks,
    })
}

/// Parse a stored payload, upgrading the unversioned layout.
pub fn decode(payload: &str) -> Result<Decoded, DecodeError> {
    let (tracks, migrated) = match serde_json::from_str::<StoredPayload>(payload)? {
        StoredPayload::Versioned(env) if env.version == SCHEMA_VERSION => (env.tracks, false),
        StoredPayload::Versioned(env) => {
            return Err(DecodeError::UnsupportedVersion { found: env.version });
        }
        StoredPayload::Legacy(tracks) => (tracks, true),
    };

    let mut seen = HashSet::with_capacity(tracks.len());
    for t in &tracks {
        if !seen.insert(t.id.as_str()) {
            return Err(DecodeError::DuplicateId(t.id.clone()));
        }
    }

    Ok(Decoded { tracks, migrated })
}
