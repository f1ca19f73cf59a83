//! Elevation field storage and sampling.

mod elevation;
mod sampler;

pub use elevation::ElevationField;
pub use sampler::WaterSample;
