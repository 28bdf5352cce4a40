//! The catalog store: owns the track list and persists it after each mutation.

use log::{debug, info, warn};
use uuid::Uuid;

use crate::access::Capabilities;

use super::codec::{decode, encode};
use super::model::{NewTrack, Track};
use super::seed::seed_tracks;
use super::storage::Storage;

/// Authoritative in-memory catalog backed by a [`Storage`] slot.
pub struct CatalogStore {
    tracks: Vec<Track>,
    storage: Box<dyn Storage>,
}

impl CatalogStore {
    /// Load the catalog from `storage`.
    ///
    /// An empty slot, or one holding only whitespace, is treated as never
    /// written: it is seeded and the seed persisted. A payload in the old
    /// unversioned layout is rewritten in the current one. A payload that
    /// cannot be decoded yields the seed collection and is left in place.
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let mut store = Self {
            tracks: Vec::new(),
            storage,
        };

        let payload = store.storage.read().filter(|p| !p.trim().is_empty());
        match payload {
            None => {
                info!("catalog storage is empty, seeding");
                store.tracks = seed_tracks();
                store.persist();
            }
            Some(payload) => match decode(&payload) {
                Ok(decoded) => {
                    store.tracks = decoded.tracks;
                    if decoded.migrated {
                        info!("upgrading stored catalog to the current schema");
                        store.persist();
                    }
                }
                Err(e) => {
                    warn!("stored catalog is unusable ({e}), falling back to seed");
                    store.tracks = seed_tracks();
                }
            },
        }

        debug!("catalog loaded with {} tracks", store.tracks.len());
        store
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Borrow the mutation operations. Returns `None` when `caps` does not
    /// allow mutation.
    pub fn editor(&mut self, caps: Capabilities) -> Option<CatalogEditor<'_>> {
        caps.can_mutate().then_some(CatalogEditor { store: self })
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    // Write failures leave the in-memory catalog as is; the session continues
    // unsaved.
    fn persist(&mut self) {
        let payload = match encode(&self.tracks) {
            Ok(p) => p,
            Err(e) => {
                warn!("failed to serialize catalog: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.write(&payload) {
            warn!("failed to persist catalog: {e}");
        }
    }
}

/// Mutation handle handed out by [`CatalogStore::editor`].
pub struct CatalogEditor<'a> {
    store: &'a mut CatalogStore,
}

impl CatalogEditor<'_> {
    /// Append a track under a freshly generated id.
    pub fn add(&mut self, new: NewTrack) -> &[Track] {
        let id = self.store.fresh_id();
        debug!("adding track {id}: {} - {}", new.artist(), new.title());
        self.store.tracks.push(new.into_track(id));
        self.store.persist();
        &self.store.tracks
    }

    /// Remove the track with `id`. Unknown ids leave the catalog unchanged.
    pub fn delete(&mut self, id: &str) -> &[Track] {
        let before = self.store.tracks.len();
        self.store.tracks.retain(|t| t.id != id);
        if self.store.tracks.len() == before {
            debug!("delete: no track with id {id}");
        }
        self.store.persist();
        &self.store.tracks
    }

    /// Replace the whole catalog with the seed collection.
    pub fn reset(&mut self) -> &[Track] {
        info!("resetting catalog to seed");
        self.store.tracks = seed_tracks();
        self.store.persist();
        &self.store.tracks
    }
}
