use crate::{ComponentFlags, EntityId, EntityStore};

/// Advances registered entities by their velocity and bounces them off the world bounds.
#[derive(Clone, Debug, Default)]
pub struct MovementSystem {
    entities: Vec<EntityId>,
    bounds: Option<EntityId>,
}

impl MovementSystem {
    /// Create a system with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a system with room for `capacity` entities.
    pub fn with_capacity(capacity: usize) -> Self {
        MovementSystem {
            entities: Vec::with_capacity(capacity),
            bounds: None,
        }
    }

    /// Add an entity to the set moved every frame.
    /// It has to carry a `Position` and a `Move`.
    pub fn register(&mut self, store: &EntityStore, id: EntityId) {
        debug_assert!(
            store.has(id, ComponentFlags::POSITION | ComponentFlags::MOVE),
            "{:?} registered for movement without Position and Move",
            id
        );
        self.entities.push(id);
    }

    /// Record the entity holding the `WorldBounds`. Only one is allowed.
    pub fn set_bounds(&mut self, store: &EntityStore, id: EntityId) {
        assert!(self.bounds.is_none(), "world bounds already set");
        debug_assert!(store.has(id, ComponentFlags::BOUNDS));
        self.bounds = Some(id);
    }

    /// Entity whose bounds are used, if set.
    #[inline]
    pub fn bounds_entity(&self) -> Option<EntityId> {
        self.bounds
    }

    /// Registered entities, in registration order.
    #[inline]
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    /// Move every registered entity by `velocity * dt`.
    ///
    /// Each axis is then checked against both of its edges independently: an entity
    /// past an edge is put back on it and that velocity component is flipped.
    /// Crossing a corner therefore reflects both components in the same step.
    ///
    /// # Panics
    /// Panics if [`set_bounds`](#method.set_bounds) was never called.
    pub fn update(&self, store: &mut EntityStore, dt: f32) {
        let bounds_id = self.bounds.expect("movement updated before world bounds were set");
        let bounds = *store
            .bounds(bounds_id)
            .expect("bounds entity lost its WorldBounds");

        for &id in &self.entities {
            let (pos, mv) = match store.moving_mut(id) {
                Some(pair) => pair,
                None => continue,
            };

            pos.x += mv.vel_x * dt;
            pos.y += mv.vel_y * dt;

            if pos.x < bounds.x_min {
                mv.vel_x = -mv.vel_x;
                pos.x = bounds.x_min;
            }
            if pos.x > bounds.x_max {
                mv.vel_x = -mv.vel_x;
                pos.x = bounds.x_max;
            }
            if pos.y < bounds.y_min {
                mv.vel_y = -mv.vel_y;
                pos.y = bounds.y_min;
            }
            if pos.y > bounds.y_max {
                mv.vel_y = -mv.vel_y;
                pos.y = bounds.y_max;
            }
        }
    }
}
