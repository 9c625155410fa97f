/*!
Data-oriented sprite simulation.

Dotsim moves a crowd of sprite dots inside a rectangle. They bounce off its edges,
and when one gets close to one of a few "hazard" dots it turns around and takes the
hazard's color.

All component data lives in an [`EntityStore`](struct.EntityStore.html): one array per
component kind, indexed by a dense [`EntityId`](struct.EntityId.html), plus a flag set
per entity telling which rows are present. Nothing points back from a component to its
entity, and systems only keep ids:

  - [`MovementSystem`](struct.MovementSystem.html) integrates velocity and reflects it at the world bounds
  - [`AvoidanceSystem`](struct.AvoidanceSystem.html) tests every avoider against every hazard

[`SimulationWorld`](struct.SimulationWorld.html) owns the store and both systems, runs
them in order once per frame and compacts the drawable entities into a flat
[`RenderRecord`](struct.RenderRecord.html) buffer supplied by the caller.

The simulation is single-threaded; a frame runs to completion inside `update`.
*/
#![warn(missing_docs)]

mod avoidance;
mod components;
mod config;
mod error;
mod flags;
mod movement;
mod store;
mod world;

pub use crate::{
    avoidance::{AvoidanceSystem, OVERSHOOT},
    components::{AvoidThis, Move, Position, Sprite, WorldBounds},
    config::SimConfig,
    error::ConfigError,
    flags::ComponentFlags,
    movement::MovementSystem,
    store::{EntityStore, Renderables},
    world::{RenderRecord, SimulationWorld},
};

/// Handle of an entity: its row in every component array of an `EntityStore`.
///
/// Ids are handed out densely by [`EntityStore::create_entity`](struct.EntityStore.html#method.create_entity)
/// and never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u32);

impl EntityId {
    /// Row index in the component arrays.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
