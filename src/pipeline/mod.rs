//! Pipeline module for orchestrating generation stages.
//!
//! Provides a trait-based architecture for modular generation stages that
//! can be composed into a complete planet generation run, including the
//! orchestrator-side buffer rewrites (normalization, smoothing) that sit
//! between the core stages.

mod stage;

pub use stage::{
    ErosionStage, GenerationStage, HydrologyStage, NormalizeStage, Pipeline, PipelineError,
    SmoothStage, StageId, TectonicStage,
};
