//! Tectonic plate synthesis.
//!
//! Populates the elevation field from a Voronoi-like plate partition:
//! - plates placed at random grid cells with uplift, crust type and size bias
//! - a boundary-proximity signal from the nearest / second-nearest scaled
//!   distance ratio
//! - mountain ridges, trenches or transform faults along plate boundaries
//!   depending on the configured fault mode

mod config;
mod plate;
mod synth;

pub use config::TectonicConfig;
pub use plate::{CrustType, FaultType, Plate};
pub use synth::generate_tectonics;
