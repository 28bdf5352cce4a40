//! Settings for trackshelf.
//!
//! `schema` holds the typed sections (access role, catalog storage, initial
//! query, UI, logging); `load` layers defaults, the TOML file and
//! `TRACKSHELF__*` environment variables.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
