use log::{debug, info, trace};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    AvoidanceSystem, ConfigError, EntityStore, Move, MovementSystem, SimConfig, Sprite,
};

/// One drawable sprite instance, laid out for direct upload as an instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderRecord {
    /// Horizontal position, zoomed.
    pub x: f32,
    /// Vertical position, zoomed.
    pub y: f32,
    /// Sprite size, zoomed.
    pub scale: f32,
    /// Red channel.
    pub color_r: f32,
    /// Green channel.
    pub color_g: f32,
    /// Blue channel.
    pub color_b: f32,
    /// Atlas cell, carried as a float to keep the record uniform.
    pub sprite_index: f32,
}

impl RenderRecord {
    /// View a record slice as raw bytes.
    pub fn as_bytes(records: &[RenderRecord]) -> &[u8] {
        bytemuck::cast_slice(records)
    }
}

/// Scene state that only exists between `initialize` and `shutdown`.
#[derive(Debug)]
struct Scene {
    config: SimConfig,
    seed: u64,
    store: EntityStore,
    movement: MovementSystem,
    avoidance: AvoidanceSystem,
    frame: u64,
}

/// Owner of the entity store and both systems.
///
/// The harness drives it with [`initialize`](#method.initialize), one
/// [`update`](#method.update) per frame, and [`shutdown`](#method.shutdown).
///
/// # Examples
/// ```rust
/// # use dotsim::{RenderRecord, SimConfig, SimulationWorld};
/// let config = SimConfig { object_count: 100, avoid_count: 4, seed: Some(1), ..SimConfig::default() };
/// let mut world = SimulationWorld::new();
/// world.initialize(&config).unwrap();
/// let mut records = vec![RenderRecord::default(); world.render_capacity()];
/// let count = world.update(0.0, 1.0 / 60.0, &mut records);
/// assert_eq!(count, 104);
/// world.shutdown();
/// ```
#[derive(Debug, Default)]
pub struct SimulationWorld {
    scene: Option<Scene>,
}

impl SimulationWorld {
    /// Create an uninitialized world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world holding only the bounds entity of `config`, with nothing registered.
    ///
    /// Scenarios can then be built through [`store_mut`](#method.store_mut),
    /// [`movement_mut`](#method.movement_mut) and [`avoidance_mut`](#method.avoidance_mut).
    pub fn empty(config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = resolve_seed(config);
        let mut store = EntityStore::new();
        let mut movement = MovementSystem::new();
        let bounds = store.create_entity();
        store.add_bounds(bounds, config.bounds);
        movement.set_bounds(&store, bounds);
        let mut avoidance = AvoidanceSystem::new();
        avoidance.set_bounds(&store, bounds);
        Ok(SimulationWorld {
            scene: Some(Scene {
                config: config.clone(),
                seed,
                store,
                movement,
                avoidance,
                frame: 0,
            }),
        })
    }

    /// Populate the scene described by `config`, replacing any previous one.
    ///
    /// Creates the bounds entity, then `object_count` white movers registered as
    /// avoiders, then `avoid_count` colored hazards near the center.
    /// Nothing changes if the configuration is invalid.
    pub fn initialize(&mut self, config: &SimConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let seed = resolve_seed(config);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut store = EntityStore::with_capacity(config.entity_count());
        let mut movement = MovementSystem::with_capacity(config.object_count + config.avoid_count);
        let mut avoidance = AvoidanceSystem::with_capacity(config.object_count, config.avoid_count);

        let bounds_id = store.create_entity();
        store.add_bounds(bounds_id, config.bounds);
        movement.set_bounds(&store, bounds_id);
        avoidance.set_bounds(&store, bounds_id);

        for i in 0..config.object_count {
            let id = store.create_entity();
            store.add_position(id, config.bounds.random_position(&mut rng));
            let sprite_index = (i % config.palette_size as usize) as u32;
            store.add_sprite(id, Sprite::white(sprite_index, config.object_scale));
            store.add_move(
                id,
                Move::random(&mut rng, config.object_min_speed, config.object_max_speed),
            );
            movement.register(&store, id);
            avoidance.register_avoider(&store, id);
        }

        let hazard_area = config.bounds.scaled(config.hazard_spread);
        for _ in 0..config.avoid_count {
            let id = store.create_entity();
            store.add_position(id, hazard_area.random_position(&mut rng));
            let mut sprite = Sprite::white(config.hazard_sprite_index, config.hazard_scale);
            sprite.set_color([
                pastel(&mut rng),
                pastel(&mut rng),
                pastel(&mut rng),
            ]);
            store.add_sprite(id, sprite);
            store.add_move(
                id,
                Move::random(&mut rng, config.hazard_min_speed, config.hazard_max_speed),
            );
            movement.register(&store, id);
            avoidance.register_hazard(&store, id, config.hazard_distance);
        }

        info!(
            "Initialized {} sprites and {} hazards (seed {})",
            config.object_count, config.avoid_count, seed
        );
        debug!(
            "Store holds {} entities, capacity {}",
            store.len(),
            store.capacity()
        );

        self.scene = Some(Scene {
            config: config.clone(),
            seed,
            store,
            movement,
            avoidance,
            frame: 0,
        });
        Ok(())
    }

    /// Advance one frame and write the drawable sprites into `out`.
    ///
    /// Movement runs first, then avoidance reacts to the moved positions and keeps
    /// nudged avoiders inside the world bounds, then every
    /// entity with a `Position` and a `Sprite` is written out in id order, zoomed by
    /// `global_scale`. Returns the number of records written.
    ///
    /// # Panics
    /// Panics if the world is not initialized, or if `out` can't hold every drawable
    /// entity (the buffer should be `render_capacity()` long).
    pub fn update(&mut self, sim_time: f64, dt: f32, out: &mut [RenderRecord]) -> usize {
        let scene = self
            .scene
            .as_mut()
            .expect("SimulationWorld::update called before initialize");

        scene.movement.update(&mut scene.store, dt);
        let reacted = scene.avoidance.update(&mut scene.store, dt);
        scene.frame += 1;
        trace!(
            "Frame {} at {:.3}s: {} avoiders reacted",
            scene.frame,
            sim_time,
            reacted
        );

        let zoom = scene.config.global_scale;
        let mut count = 0;
        for (_, pos, sprite) in scene.store.renderables() {
            assert!(
                count < out.len(),
                "render buffer of {} records is too small",
                out.len()
            );
            out[count] = RenderRecord {
                x: pos.x * zoom,
                y: pos.y * zoom,
                scale: sprite.scale * zoom,
                color_r: sprite.color_r,
                color_g: sprite.color_g,
                color_b: sprite.color_b,
                sprite_index: sprite.sprite_index as f32,
            };
            count += 1;
        }
        debug_assert!(count <= scene.config.max_sprite_count);
        count
    }

    /// Drop all entity state. The world can be initialized again afterwards.
    pub fn shutdown(&mut self) {
        if let Some(scene) = self.scene.take() {
            info!(
                "Shut down after {} frames, released {} entities",
                scene.frame,
                scene.store.len()
            );
        }
    }

    /// Returns true between `initialize` and `shutdown`.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.scene.is_some()
    }

    /// Number of records the harness buffer must hold.
    ///
    /// # Panics
    /// Panics if the world is not initialized.
    pub fn render_capacity(&self) -> usize {
        self.scene().config.max_sprite_count
    }

    /// Configuration of the current scene.
    pub fn config(&self) -> &SimConfig {
        &self.scene().config
    }

    /// Seed the current scene was generated from.
    pub fn seed(&self) -> u64 {
        self.scene().seed
    }

    /// Number of updates since `initialize`.
    pub fn frame_index(&self) -> u64 {
        self.scene().frame
    }

    /// Read access to the entity store.
    pub fn store(&self) -> &EntityStore {
        &self.scene().store
    }

    /// Write access to the entity store.
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.scene_mut().store
    }

    /// The movement system of the current scene.
    pub fn movement(&self) -> &MovementSystem {
        &self.scene().movement
    }

    /// Write access to the movement system, for building scenarios.
    /// Returns the store too, since registration checks it.
    pub fn movement_mut(&mut self) -> (&mut MovementSystem, &mut EntityStore) {
        let scene = self.scene_mut();
        (&mut scene.movement, &mut scene.store)
    }

    /// The avoidance system of the current scene.
    pub fn avoidance(&self) -> &AvoidanceSystem {
        &self.scene().avoidance
    }

    /// Write access to the avoidance system, for building scenarios.
    /// Returns the store too, since registration checks it.
    pub fn avoidance_mut(&mut self) -> (&mut AvoidanceSystem, &mut EntityStore) {
        let scene = self.scene_mut();
        (&mut scene.avoidance, &mut scene.store)
    }

    fn scene(&self) -> &Scene {
        self.scene
            .as_ref()
            .expect("SimulationWorld used before initialize")
    }

    fn scene_mut(&mut self) -> &mut Scene {
        self.scene
            .as_mut()
            .expect("SimulationWorld used before initialize")
    }
}

fn resolve_seed(config: &SimConfig) -> u64 {
    match config.seed {
        Some(seed) => seed,
        None => ChaCha8Rng::from_entropy().next_u64(),
    }
}

fn pastel<R: rand::Rng>(rng: &mut R) -> f32 {
    rng.gen_range(0.5..1.0)
}
