//! Particle-based hydraulic erosion.
//!
//! Terrain is weathered by many independent water droplets. Each droplet
//! spawns at a random position, follows the local gradient downhill with
//! some inertia, picks up sediment on steep descents and drops it again
//! when it slows, evaporating as it goes. Droplets never interact with
//! each other, only with the shared elevation buffer.

mod config;
mod droplet;

pub use config::ErosionConfig;
pub use droplet::apply_erosion;
