#![allow(dead_code)]

use dotsim::SimConfig;

/// Regular moving sprites.
pub const N_OBJECTS: usize = 20_000;

/// Hazards in the default bench scene.
pub const N_HAZARDS: usize = 20;

/// Fixed frame step.
pub const DT: f32 = 1.0 / 60.0;

pub fn config(objects: usize, hazards: usize) -> SimConfig {
    SimConfig {
        object_count: objects,
        avoid_count: hazards,
        seed: Some(0x5eed),
        ..SimConfig::default()
    }
}
