//! Procedural planet elevation and hydrology generator.
//!
//! This crate synthesizes a planet-scale elevation field from tectonic
//! plates, weathers it with particle-based hydraulic erosion, and routes
//! surface water into rivers and lakes. The output is a deterministic
//! (given a seed) heightmap plus water mask intended for consumption by
//! an external renderer or mesh builder.

pub mod field;
pub mod tectonics;
pub mod erosion;
pub mod hydrology;
pub mod pipeline;
pub mod export;

pub use field::{ElevationField, WaterSample};
pub use tectonics::{CrustType, FaultType, Plate, TectonicConfig};
pub use erosion::ErosionConfig;
pub use hydrology::HydrologyConfig;
pub use pipeline::{
    ErosionStage, GenerationStage, HydrologyStage, NormalizeStage, Pipeline, PipelineError,
    SmoothStage, StageId, TectonicStage,
};
