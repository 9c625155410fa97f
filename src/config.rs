//! Simulation parameters.
//!
//! Every field has a default, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! object_count = 50000
//! avoid_count = 40
//! seed = 42
//!
//! [bounds]
//! x_min = -100.0
//! x_max = 100.0
//! y_min = -60.0
//! y_max = 60.0
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, WorldBounds};

/// Everything `SimulationWorld::initialize` needs to populate a scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of regular moving sprites (avoiders).
    pub object_count: usize,
    /// Number of hazards.
    pub avoid_count: usize,
    /// Speed range of regular sprites.
    pub object_min_speed: f32,
    /// See `object_min_speed`.
    pub object_max_speed: f32,
    /// Speed range of hazards.
    pub hazard_min_speed: f32,
    /// See `hazard_min_speed`.
    pub hazard_max_speed: f32,
    /// Avoiders closer than this to a hazard react.
    pub hazard_distance: f32,
    /// Hazards spawn inside `bounds` scaled by this factor.
    pub hazard_spread: f32,
    /// Sprite size of regular sprites.
    pub object_scale: f32,
    /// Sprite size of hazards.
    pub hazard_scale: f32,
    /// Zoom applied to positions and sizes in render records.
    pub global_scale: f32,
    /// Regular sprites cycle through atlas cells `0..palette_size`.
    pub palette_size: u32,
    /// Atlas cell used for hazards.
    pub hazard_sprite_index: u32,
    /// Number of cells in the harness sprite atlas.
    pub atlas_cells: u32,
    /// Size of the render buffer the harness provides.
    pub max_sprite_count: usize,
    /// Random seed; a fresh one is drawn when absent.
    pub seed: Option<u64>,
    /// Rectangle all moving entities stay in.
    pub bounds: WorldBounds,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            object_count: 10_000,
            avoid_count: 20,
            object_min_speed: 0.5,
            object_max_speed: 0.7,
            hazard_min_speed: 0.1,
            hazard_max_speed: 0.2,
            hazard_distance: 1.3,
            hazard_spread: 0.2,
            object_scale: 1.0,
            hazard_scale: 2.0,
            global_scale: 0.05,
            palette_size: 5,
            hazard_sprite_index: 5,
            atlas_cells: 8,
            max_sprite_count: 100_000,
            seed: None,
            bounds: WorldBounds::default(),
        }
    }
}

impl SimConfig {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML text.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Total number of entities `initialize` creates, bounds included.
    pub fn entity_count(&self) -> usize {
        1 + self.object_count + self.avoid_count
    }

    /// Check that a scene can be built from this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.bounds;
        check_range("bounds.x", b.x_min, b.x_max)?;
        check_range("bounds.y", b.y_min, b.y_max)?;
        check_speed("object", self.object_min_speed, self.object_max_speed)?;
        check_speed("hazard", self.hazard_min_speed, self.hazard_max_speed)?;
        check_positive("hazard_distance", self.hazard_distance)?;
        check_positive("object_scale", self.object_scale)?;
        check_positive("hazard_scale", self.hazard_scale)?;
        check_positive("global_scale", self.global_scale)?;
        if !(self.hazard_spread > 0.0 && self.hazard_spread <= 1.0) {
            return Err(ConfigError::HazardSpread(self.hazard_spread));
        }
        if self.palette_size == 0 {
            return Err(ConfigError::EmptyPalette);
        }
        let largest = (self.palette_size - 1).max(self.hazard_sprite_index);
        if largest >= self.atlas_cells {
            return Err(ConfigError::SpriteOutsideAtlas {
                index: largest,
                cells: self.atlas_cells,
            });
        }
        let requested = self.object_count + self.avoid_count;
        if requested > self.max_sprite_count {
            return Err(ConfigError::Capacity {
                requested,
                capacity: self.max_sprite_count,
            });
        }
        Ok(())
    }
}

fn check_range(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min > max {
        Err(ConfigError::InvertedRange { name, min, max })
    } else {
        Ok(())
    }
}

fn check_speed(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min < 0.0 {
        return Err(ConfigError::Negative { name, value: min });
    }
    check_range(name, min, max)
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}
