use thiserror::Error;

/// The error type returned when a [`SimConfig`](struct.SimConfig.html) can't be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration text is not valid TOML for `SimConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be written out as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A minimum is above its maximum.
    #[error("inverted range for {name}: {min} > {max}")]
    InvertedRange {
        /// Which range.
        name: &'static str,
        /// Lower end.
        min: f32,
        /// Upper end.
        max: f32,
    },
    /// A value that has to be strictly positive is not.
    #[error("{name} must be positive, got {value}")]
    NotPositive {
        /// Which value.
        name: &'static str,
        /// Offending value.
        value: f32,
    },
    /// A speed range reaches below zero.
    #[error("{name} must not be negative, got {value}")]
    Negative {
        /// Which value.
        name: &'static str,
        /// Offending value.
        value: f32,
    },
    /// The hazard area factor is outside `(0, 1]`.
    #[error("hazard_spread must be in (0, 1], got {0}")]
    HazardSpread(f32),
    /// No sprite cells to cycle through.
    #[error("palette_size must be at least 1")]
    EmptyPalette,
    /// A sprite index doesn't fit the harness atlas.
    #[error("sprite index {index} is outside the {cells}-cell atlas")]
    SpriteOutsideAtlas {
        /// Largest index that would be used.
        index: u32,
        /// Atlas cell count.
        cells: u32,
    },
    /// More sprites than the render buffer can hold.
    #[error("{requested} sprites requested, render capacity is {capacity}")]
    Capacity {
        /// `object_count + avoid_count`.
        requested: usize,
        /// `max_sprite_count`.
        capacity: usize,
    },
}
