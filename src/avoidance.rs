use crate::{AvoidThis, ComponentFlags, EntityId, EntityStore};

/// How far past the hazard an avoider is pushed, relative to one frame of travel.
pub const OVERSHOOT: f32 = 1.1;

/// Makes "avoider" entities bounce away from "hazard" entities and take their color.
///
/// Hazards are kept as two parallel lists, ids and thresholds, scanned in registration order.
#[derive(Clone, Debug, Default)]
pub struct AvoidanceSystem {
    avoiders: Vec<EntityId>,
    hazards: Vec<EntityId>,
    thresholds: Vec<AvoidThis>,
    bounds: Option<EntityId>,
}

impl AvoidanceSystem {
    /// Create a system with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a system with room for `avoiders` and `hazards` entries.
    pub fn with_capacity(avoiders: usize, hazards: usize) -> Self {
        AvoidanceSystem {
            avoiders: Vec::with_capacity(avoiders),
            hazards: Vec::with_capacity(hazards),
            thresholds: Vec::with_capacity(hazards),
            bounds: None,
        }
    }

    /// Register an entity reacting to hazards.
    /// It has to carry a `Position`, a `Move` and a `Sprite`.
    pub fn register_avoider(&mut self, store: &EntityStore, id: EntityId) {
        debug_assert!(
            store.has(
                id,
                ComponentFlags::POSITION | ComponentFlags::MOVE | ComponentFlags::SPRITE
            ),
            "{:?} registered as avoider without Position, Move and Sprite",
            id
        );
        self.avoiders.push(id);
    }

    /// Register a hazard that avoiders react to when closer than `distance`.
    /// It has to carry a `Position` and a `Sprite`.
    ///
    /// # Panics
    /// Panics if either component is missing.
    pub fn register_hazard(&mut self, store: &EntityStore, id: EntityId, distance: f32) {
        assert!(
            store.has(id, ComponentFlags::POSITION | ComponentFlags::SPRITE),
            "{:?} registered as hazard without Position and Sprite",
            id
        );
        self.hazards.push(id);
        self.thresholds.push(AvoidThis::from_distance(distance));
    }

    /// Record the entity holding the `WorldBounds` that nudged avoiders are kept in.
    pub fn set_bounds(&mut self, store: &EntityStore, id: EntityId) {
        assert!(self.bounds.is_none(), "world bounds already set");
        debug_assert!(store.has(id, ComponentFlags::BOUNDS));
        self.bounds = Some(id);
    }

    /// Entity whose bounds clamp the nudge, if set.
    #[inline]
    pub fn bounds_entity(&self) -> Option<EntityId> {
        self.bounds
    }

    /// Registered avoiders, in registration order.
    #[inline]
    pub fn avoiders(&self) -> &[EntityId] {
        &self.avoiders
    }

    /// Registered hazards and their thresholds, in registration order.
    pub fn hazards(&self) -> impl Iterator<Item = (EntityId, AvoidThis)> + '_ {
        self.hazards.iter().cloned().zip(self.thresholds.iter().cloned())
    }

    /// Resolve avoider/hazard contacts for one frame and return how many avoiders reacted.
    ///
    /// Every hazard is tested against the avoider's position as it was when its scan
    /// started. If any is in range, the avoider's velocity is reversed once, it is
    /// advanced by `velocity * dt * OVERSHOOT`, and it takes the color of the
    /// last hazard in range in registration order. When bounds are set, the nudged
    /// position is put back inside them; velocity is left as reversed.
    pub fn update(&self, store: &mut EntityStore, dt: f32) -> usize {
        let bounds = self.bounds.and_then(|id| store.bounds(id)).cloned();
        let mut reacted = 0;
        for &id in &self.avoiders {
            let origin = match store.position(id) {
                Some(pos) => *pos,
                None => continue,
            };

            let mut last_color = None;
            for (&hazard, threshold) in self.hazards.iter().zip(&self.thresholds) {
                if hazard == id {
                    continue;
                }
                let (hazard_pos, hazard_sprite) =
                    match (store.position(hazard), store.sprite(hazard)) {
                        (Some(pos), Some(sprite)) => (pos, sprite),
                        _ => continue,
                    };
                if origin.distance_sq(hazard_pos) < threshold.distance_sq {
                    last_color = Some(hazard_sprite.color());
                }
            }

            let color = match last_color {
                Some(color) => color,
                None => continue,
            };
            if let Some((pos, mv, sprite)) = store.body_mut(id) {
                mv.reverse();
                pos.x += mv.vel_x * dt * OVERSHOOT;
                pos.y += mv.vel_y * dt * OVERSHOOT;
                if let Some(ref bounds) = bounds {
                    bounds.clamp(pos);
                }
                sprite.set_color(color);
                reacted += 1;
            }
        }
        reacted
    }
}
