//! Catalog module: the authoritative track list and its persistence.
//!
//! `CatalogStore` owns the tracks, `Storage` is the key/value slot the
//! catalog is written to after every mutation, and `codec` defines the
//! payload format stored in that slot.

mod codec;
mod model;
mod seed;
mod storage;
mod store;

#[cfg(test)]
pub use codec::*;
pub use model::*;
#[cfg(test)]
pub use seed::seed_tracks;
pub use storage::*;
pub use store::*;
