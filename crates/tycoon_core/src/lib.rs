//! `tycoon_core`: world snapshot model and read-only queries.
//!
//! No IO, no network. Everything here is a pure function of one `WorldState`.

mod geometry;
mod scan;
mod types;
mod world;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;

pub use geometry::{centroid, distance};
pub use scan::{scan, ScanFilter};
pub use types::*;
pub use world::{ShipSet, WorldView};

#[cfg(test)]
mod tests;
