//! Droplet traversal simulation.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::ErosionConfig;
use crate::field::ElevationField;

/// Step budget per droplet.
const MAX_DROPLET_STEPS: u32 = 30;

/// Droplets die once their water volume falls below this.
const MIN_WATER: f32 = 0.01;

/// Floor on the slope term of the carrying capacity, so slow flat-ground
/// droplets can still pick up a trickle of sediment.
const MIN_CAPACITY_SLOPE: f32 = 0.01;

/// Scale of the sediment carrying capacity.
const CAPACITY_FACTOR: f32 = 4.0;

/// Elevation values are clamped into [-SANITIZE_BOUND, SANITIZE_BOUND]
/// after the pass, stopping unbounded drift from runaway deposition.
const SANITIZE_BOUND: f32 = 5.0;

/// One unit of rainfall tracing its erosive path over the terrain.
#[derive(Debug, Clone, Copy)]
struct Droplet {
    pos: Vec2,
    dir: Vec2,
    speed: f32,
    water: f32,
    sediment: f32,
}

impl Droplet {
    fn spawn(pos: Vec2) -> Self {
        Self {
            pos,
            dir: Vec2::ZERO,
            speed: 1.0,
            water: 1.0,
            sediment: 0.0,
        }
    }
}

/// Runs `config.iterations` independent droplet traversals over the field,
/// then sanitizes the elevation buffer into a bounded range.
///
/// Droplets are simulated one at a time, each reading and writing the shared
/// elevation buffer directly; later droplets see the carving of earlier
/// ones. The water mask is not touched.
pub fn apply_erosion(field: &mut ElevationField, config: &ErosionConfig) {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let size = field.size() as f32;

    for _ in 0..config.iterations {
        let spawn = Vec2::new(rng.random::<f32>() * size, rng.random::<f32>() * size);
        trace_droplet(field, config, Droplet::spawn(spawn));
    }

    field.sanitize_elevation(SANITIZE_BOUND);
}

/// Simulates one droplet from spawn to death.
fn trace_droplet(field: &mut ElevationField, config: &ErosionConfig, mut drop: Droplet) {
    let size = field.size() as f32;

    for _ in 0..MAX_DROPLET_STEPS {
        let cell_x = drop.pos.x.floor() as i32;
        let cell_y = drop.pos.y.floor() as i32;

        // Central-difference gradient; x wraps around the seam, y clamps at
        // the poles.
        let gradient = Vec2::new(
            field.height(cell_x + 1, cell_y) - field.height(cell_x - 1, cell_y),
            field.height(cell_x, cell_y + 1) - field.height(cell_x, cell_y - 1),
        );

        drop.dir = drop.dir * config.inertia - gradient * (1.0 - config.inertia);
        // A zero-length direction turns non-finite here and is caught by the
        // position check below.
        drop.dir /= drop.dir.length();
        drop.pos += drop.dir;

        // Droplets flow off the poles; the x axis wraps so only y terminates.
        if !drop.pos.x.is_finite()
            || !drop.pos.y.is_finite()
            || drop.pos.y < 0.0
            || drop.pos.y >= size - 1.0
        {
            return;
        }

        let new_x = drop.pos.x.floor() as i32;
        let new_y = drop.pos.y.floor() as i32;
        let diff = field.height(cell_x, cell_y) - field.height(new_x, new_y);

        let capacity = (-diff).max(MIN_CAPACITY_SLOPE) * drop.speed * drop.water * CAPACITY_FACTOR;

        if drop.sediment > capacity || diff < 0.0 {
            // Slowing down or flowing uphill: drop part of the excess onto
            // the cell the droplet came from.
            let deposit = (drop.sediment - capacity).max(0.0) * config.deposition_rate;
            drop.sediment -= deposit;
            field.add_height(cell_x, cell_y, deposit);
        } else {
            // Erode from the old cell, never more than the downhill drop so
            // a step cannot dig below its own destination.
            let erode = ((capacity - drop.sediment) * config.erosion_rate).min(diff.max(0.0));
            drop.sediment += erode;
            field.add_height(cell_x, cell_y, -erode);
        }

        drop.speed = (drop.speed * drop.speed + diff.max(0.0) * config.gravity).sqrt();
        drop.water *= 1.0 - config.evaporation;
        if drop.water < MIN_WATER {
            return;
        }
    }
}
