//! Query pipeline: filter, sort and optionally group the catalog.
//!
//! Everything here is a pure function of the catalog snapshot and the
//! `QueryParams`; nothing is cached between calls.

mod params;
mod pipeline;

pub use params::*;
pub use pipeline::*;

#[cfg(test)]
mod tests;
