use rand::Rng;
use serde::{Deserialize, Serialize};

/// World-space position.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Position {
    /// Create a position from its coordinates.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Position { x, y }
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn distance_sq(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Rendering attributes of a sprite.
///
/// Only the color is expected to change after creation.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Sprite {
    /// Red channel.
    pub color_r: f32,
    /// Green channel.
    pub color_g: f32,
    /// Blue channel.
    pub color_b: f32,
    /// Cell of the sprite atlas to draw.
    pub sprite_index: u32,
    /// Size in world units.
    pub scale: f32,
}

impl Sprite {
    /// Create an opaque white sprite.
    pub fn white(sprite_index: u32, scale: f32) -> Self {
        Sprite {
            color_r: 1.0,
            color_g: 1.0,
            color_b: 1.0,
            sprite_index,
            scale,
        }
    }

    /// Current color as `[r, g, b]`.
    #[inline]
    pub fn color(&self) -> [f32; 3] {
        [self.color_r, self.color_g, self.color_b]
    }

    /// Overwrite the color channels, leaving index and scale untouched.
    #[inline]
    pub fn set_color(&mut self, [r, g, b]: [f32; 3]) {
        self.color_r = r;
        self.color_g = g;
        self.color_b = b;
    }
}

/// Axis-aligned rectangle everything moving is kept inside.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// Left edge.
    pub x_min: f32,
    /// Right edge.
    pub x_max: f32,
    /// Bottom edge.
    pub y_min: f32,
    /// Top edge.
    pub y_max: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        WorldBounds {
            x_min: -80.0,
            x_max: 80.0,
            y_min: -50.0,
            y_max: 50.0,
        }
    }
}

impl WorldBounds {
    /// The same rectangle scaled around the origin.
    pub fn scaled(&self, factor: f32) -> Self {
        WorldBounds {
            x_min: self.x_min * factor,
            x_max: self.x_max * factor,
            y_min: self.y_min * factor,
            y_max: self.y_max * factor,
        }
    }

    /// Returns true if `pos` lies inside, edges included.
    #[inline]
    pub fn contains(&self, pos: &Position) -> bool {
        self.x_min <= pos.x && pos.x <= self.x_max && self.y_min <= pos.y && pos.y <= self.y_max
    }

    /// Put `pos` back on the nearest edge if it lies outside.
    #[inline]
    pub fn clamp(&self, pos: &mut Position) {
        pos.x = pos.x.max(self.x_min).min(self.x_max);
        pos.y = pos.y.max(self.y_min).min(self.y_max);
    }

    /// Uniformly sample a position inside.
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position {
            x: sample(rng, self.x_min, self.x_max),
            y: sample(rng, self.y_min, self.y_max),
        }
    }
}

/// Velocity in world units per second.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Move {
    /// Horizontal velocity.
    pub vel_x: f32,
    /// Vertical velocity.
    pub vel_y: f32,
}

impl Move {
    /// Create a velocity from its components.
    #[inline]
    pub fn new(vel_x: f32, vel_y: f32) -> Self {
        Move { vel_x, vel_y }
    }

    /// Random heading over a half turn, speed uniform in `[min_speed, max_speed]`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, min_speed: f32, max_speed: f32) -> Self {
        let angle = rng.gen::<f32>() * std::f32::consts::PI;
        let speed = sample(rng, min_speed, max_speed);
        Move {
            vel_x: angle.cos() * speed,
            vel_y: angle.sin() * speed,
        }
    }

    /// Flip both components.
    #[inline]
    pub fn reverse(&mut self) {
        self.vel_x = -self.vel_x;
        self.vel_y = -self.vel_y;
    }
}

/// Hazard attribute: avoiders closer than this react.
///
/// The threshold is kept squared so the proximity test needs no square root.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AvoidThis {
    /// Squared reaction distance.
    pub distance_sq: f32,
}

impl AvoidThis {
    /// Build from a plain (non-squared) distance.
    #[inline]
    pub fn from_distance(distance: f32) -> Self {
        AvoidThis {
            distance_sq: distance * distance,
        }
    }
}

// `gen_range` panics on an empty range, a degenerate one just yields its bound.
fn sample<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if low < high {
        rng.gen_range(low..high)
    } else {
        low
    }
}
