//! Generation stage trait and pipeline orchestration.

use thiserror::Error;

use crate::erosion::{apply_erosion, ErosionConfig};
use crate::field::ElevationField;
use crate::hydrology::{apply_hydrology, HydrologyConfig};
use crate::tectonics::{generate_tectonics, TectonicConfig};

/// Unique identifier for generation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Tectonic plate synthesis.
    Tectonics,
    /// Particle-based hydraulic erosion.
    Erosion,
    /// Elevation rescale into [0, 1].
    Normalize,
    /// Box-blur smoothing.
    Smooth,
    /// Depression filling, flow routing and water masking.
    Hydrology,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Tectonics => "tectonics",
            StageId::Erosion => "erosion",
            StageId::Normalize => "normalize",
            StageId::Smooth => "smooth",
            StageId::Hydrology => "hydrology",
        }
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
}

/// Trait for implementing generation stages.
///
/// Each stage transforms the elevation field in place, building on previous
/// stages. The field is handed back between stage calls, so stages must not
/// assume any particular prior distribution of values beyond "finite,
/// roughly bounded".
pub trait GenerationStage {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the generation stage, modifying the field in place.
    fn execute(&self, field: &mut ElevationField);
}

/// Orchestrates multiple generation stages into a complete pipeline.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn GenerationStage>>,
}

impl Pipeline {
    /// Creates a new empty pipeline.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// The full standard pipeline: tectonics, normalization, smoothing,
    /// erosion, renormalization, hydrology.
    pub fn standard(
        tectonics: TectonicConfig,
        erosion: ErosionConfig,
        hydrology: HydrologyConfig,
    ) -> Self {
        let mut pipeline = Self::new();
        pipeline
            .add_stage(TectonicStage::new(tectonics))
            .add_stage(NormalizeStage)
            .add_stage(SmoothStage::new(1))
            .add_stage(ErosionStage::new(erosion))
            .add_stage(NormalizeStage)
            .add_stage(HydrologyStage::new(hydrology));
        pipeline
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: GenerationStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Executes all stages in order on the given field.
    pub fn run(&self, field: &mut ElevationField) -> Result<(), PipelineError> {
        self.run_with_callbacks(field, |_, _, _| {}, |_, _, _| {})
    }

    /// Executes all stages with progress callbacks.
    ///
    /// # Arguments
    /// * `field` - The elevation field to generate into
    /// * `on_stage_start` - Called when each stage begins
    /// * `on_stage_complete` - Called when each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        field: &mut ElevationField,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<(), PipelineError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let total = self.stages.len();
        let mut completed: Vec<StageId> = Vec::new();

        for (i, stage) in self.stages.iter().enumerate() {
            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(PipelineError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            on_stage_start(stage.name(), i, total);
            stage.execute(field);
            completed.push(stage.id());
            on_stage_complete(stage.name(), i, total);
        }

        Ok(())
    }
}

/// Tectonic plate synthesis stage.
pub struct TectonicStage {
    pub config: TectonicConfig,
}

impl TectonicStage {
    pub fn new(config: TectonicConfig) -> Self {
        Self { config }
    }
}

impl GenerationStage for TectonicStage {
    fn id(&self) -> StageId {
        StageId::Tectonics
    }

    fn name(&self) -> &str {
        "Tectonic Synthesis"
    }

    fn execute(&self, field: &mut ElevationField) {
        generate_tectonics(field, &self.config);
    }
}

/// Hydraulic erosion stage.
pub struct ErosionStage {
    pub config: ErosionConfig,
}

impl ErosionStage {
    pub fn new(config: ErosionConfig) -> Self {
        Self { config }
    }
}

impl GenerationStage for ErosionStage {
    fn id(&self) -> StageId {
        StageId::Erosion
    }

    fn name(&self) -> &str {
        "Hydraulic Erosion"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Tectonics]
    }

    fn execute(&self, field: &mut ElevationField) {
        apply_erosion(field, &self.config);
    }
}

/// Hydrology routing stage.
pub struct HydrologyStage {
    pub config: HydrologyConfig,
}

impl HydrologyStage {
    pub fn new(config: HydrologyConfig) -> Self {
        Self { config }
    }
}

impl GenerationStage for HydrologyStage {
    fn id(&self) -> StageId {
        StageId::Hydrology
    }

    fn name(&self) -> &str {
        "Hydrology Routing"
    }

    fn dependencies(&self) -> &[StageId] {
        // Hydrology reads whatever terrain exists; erosion in between is
        // optional.
        &[StageId::Tectonics]
    }

    fn execute(&self, field: &mut ElevationField) {
        apply_hydrology(field, &self.config);
    }
}

/// Rescales the elevation buffer into [0, 1].
///
/// This is the orchestrator-side rewrite that runs between the core stages;
/// a degenerate flat field is left unchanged rather than divided by zero.
pub struct NormalizeStage;

impl GenerationStage for NormalizeStage {
    fn id(&self) -> StageId {
        StageId::Normalize
    }

    fn name(&self) -> &str {
        "Normalize"
    }

    fn execute(&self, field: &mut ElevationField) {
        let (min, max) = field.height_range();
        let range = max - min;
        if range <= f32::EPSILON || !range.is_finite() {
            return;
        }
        for h in &mut field.elevation {
            *h = (*h - min) / range;
        }
    }
}

/// Separable 3x3 box blur over the elevation buffer, respecting the wrap /
/// clamp topology of the grid.
pub struct SmoothStage {
    pub passes: u32,
}

impl SmoothStage {
    pub fn new(passes: u32) -> Self {
        Self { passes }
    }
}

impl GenerationStage for SmoothStage {
    fn id(&self) -> StageId {
        StageId::Smooth
    }

    fn name(&self) -> &str {
        "Smooth"
    }

    fn execute(&self, field: &mut ElevationField) {
        let size = field.size() as i32;
        let mut scratch = vec![0.0f32; field.cell_count()];

        for _ in 0..self.passes {
            // Horizontal pass (wrapping).
            for y in 0..size {
                for x in 0..size {
                    let sum = field.height(x - 1, y) + field.height(x, y) + field.height(x + 1, y);
                    scratch[(y * size + x) as usize] = sum / 3.0;
                }
            }
            field.elevation.copy_from_slice(&scratch);

            // Vertical pass (clamping).
            for y in 0..size {
                for x in 0..size {
                    let sum = field.height(x, y - 1) + field.height(x, y) + field.height(x, y + 1);
                    scratch[(y * size + x) as usize] = sum / 3.0;
                }
            }
            field.elevation.copy_from_slice(&scratch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_id_name() {
        assert_eq!(StageId::Tectonics.name(), "tectonics");
        assert_eq!(StageId::Hydrology.name(), "hydrology");
    }

    #[test]
    fn test_missing_dependency_is_rejected() {
        let mut pipeline = Pipeline::new();
        pipeline.add_stage(ErosionStage::new(ErosionConfig::light(1)));

        let mut field = ElevationField::new(8);
        let err = pipeline.run(&mut field).unwrap_err();
        assert!(matches!(err, PipelineError::MissingDependency(_, _)));
    }

    #[test]
    fn test_standard_pipeline_runs() {
        let pipeline = Pipeline::standard(
            TectonicConfig::earth_like(42),
            ErosionConfig::light(42),
            HydrologyConfig::default(),
        );
        let mut field = ElevationField::new(32);
        pipeline.run(&mut field).unwrap();

        assert!(field.elevation.iter().all(|h| h.is_finite()));
        assert!(field
            .water_mask
            .iter()
            .all(|&m| (0.0..=1.0).contains(&m)));
    }

    #[test]
    fn test_full_pipeline_determinism() {
        let run = || {
            let pipeline = Pipeline::standard(
                TectonicConfig::earth_like(123),
                ErosionConfig::light(123),
                HydrologyConfig::default(),
            );
            let mut field = ElevationField::new(32);
            pipeline.run(&mut field).unwrap();
            field
        };

        let a = run();
        let b = run();
        assert_eq!(a.elevation, b.elevation);
        assert_eq!(a.water_mask, b.water_mask);
    }

    #[test]
    fn test_pipeline_with_callbacks() {
        let mut pipeline = Pipeline::new();
        pipeline.add_stage(TectonicStage::new(TectonicConfig::earth_like(1)));

        let mut field = ElevationField::new(8);
        let mut started = false;
        let mut completed = false;

        pipeline
            .run_with_callbacks(
                &mut field,
                |name, _, _| {
                    assert_eq!(name, "Tectonic Synthesis");
                    started = true;
                },
                |name, _, _| {
                    assert_eq!(name, "Tectonic Synthesis");
                    completed = true;
                },
            )
            .unwrap();

        assert!(started);
        assert!(completed);
    }

    #[test]
    fn test_normalize_stage_rescales() {
        let mut field = ElevationField::new(4);
        for (i, h) in field.elevation.iter_mut().enumerate() {
            *h = i as f32;
        }
        NormalizeStage.execute(&mut field);

        let (min, max) = field.height_range();
        assert!((min - 0.0).abs() < 1e-6);
        assert!((max - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_stage_skips_flat_field() {
        let mut field = ElevationField::new(4);
        field.elevation.fill(0.3);
        NormalizeStage.execute(&mut field);
        assert!(field.elevation.iter().all(|&h| h == 0.3));
    }

    #[test]
    fn test_smooth_stage_reduces_variation() {
        let mut field = ElevationField::new(16);
        for (i, h) in field.elevation.iter_mut().enumerate() {
            *h = if i % 2 == 0 { 0.0 } else { 1.0 };
        }
        let (min0, max0) = field.height_range();
        SmoothStage::new(2).execute(&mut field);
        let (min1, max1) = field.height_range();
        assert!(max1 - min1 < max0 - min0);
    }
}
