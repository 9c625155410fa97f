use crate::{ComponentFlags, EntityId, Move, Position, Sprite, WorldBounds};

/// Component storage for every entity of a simulation.
///
/// Each component kind lives in its own array, all arrays are indexed by [`EntityId`]
/// and grow together. A per-entity [`ComponentFlags`] tells which rows are meaningful.
///
/// # Examples
/// ```rust
/// # use dotsim::{EntityStore, Position};
/// let mut store = EntityStore::with_capacity(2);
/// let id = store.create_entity();
/// assert!(store.position(id).is_none());
/// store.add_position(id, Position::new(1.0, 2.0));
/// store.position_mut(id).unwrap().x = 3.0;
/// assert_eq!(store.position(id), Some(&Position::new(3.0, 2.0)));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityStore {
    flags: Vec<ComponentFlags>,
    positions: Vec<Position>,
    sprites: Vec<Sprite>,
    bounds: Vec<WorldBounds>,
    moves: Vec<Move>,
}

impl EntityStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty store with room for `capacity` entities.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut store = Self::new();
        store.reserve(capacity);
        store
    }

    /// Reserve room for at least `additional` more entities in every array.
    pub fn reserve(&mut self, additional: usize) {
        self.flags.reserve(additional);
        self.positions.reserve(additional);
        self.sprites.reserve(additional);
        self.bounds.reserve(additional);
        self.moves.reserve(additional);
    }

    /// Append a new entity without any component and return its id.
    pub fn create_entity(&mut self) -> EntityId {
        let index = self.flags.len();
        debug_assert!(index < u32::max_value() as usize);
        self.flags.push(ComponentFlags::EMPTY);
        self.positions.push(Position::default());
        self.sprites.push(Sprite::default());
        self.bounds.push(WorldBounds::default());
        self.moves.push(Move::default());
        debug_assert_eq!(self.positions.len(), self.flags.len());
        EntityId(index as u32)
    }

    /// Number of entities created so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns true if no entity was created.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Number of entities the store can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.flags
            .capacity()
            .min(self.positions.capacity())
            .min(self.sprites.capacity())
            .min(self.bounds.capacity())
            .min(self.moves.capacity())
    }

    /// Iterate the ids of all entities, in creation order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> {
        (0..self.flags.len() as u32).map(EntityId)
    }

    /// Components carried by `id`.
    #[inline]
    pub fn flags(&self, id: EntityId) -> ComponentFlags {
        self.flags[id.index()]
    }

    /// Returns true if `id` carries every component of `flags`.
    #[inline]
    pub fn has(&self, id: EntityId, flags: ComponentFlags) -> bool {
        self.flags[id.index()].contains(flags)
    }

    /// Attach (or overwrite) a `Position`.
    pub fn add_position(&mut self, id: EntityId, value: Position) {
        self.positions[id.index()] = value;
        self.flags[id.index()].insert(ComponentFlags::POSITION);
    }

    /// Attach (or overwrite) a `Sprite`.
    pub fn add_sprite(&mut self, id: EntityId, value: Sprite) {
        self.sprites[id.index()] = value;
        self.flags[id.index()].insert(ComponentFlags::SPRITE);
    }

    /// Attach (or overwrite) `WorldBounds`.
    pub fn add_bounds(&mut self, id: EntityId, value: WorldBounds) {
        self.bounds[id.index()] = value;
        self.flags[id.index()].insert(ComponentFlags::BOUNDS);
    }

    /// Attach (or overwrite) a `Move`.
    pub fn add_move(&mut self, id: EntityId, value: Move) {
        self.moves[id.index()] = value;
        self.flags[id.index()].insert(ComponentFlags::MOVE);
    }

    /// Read the `Position` of `id`, if it has one.
    #[inline]
    pub fn position(&self, id: EntityId) -> Option<&Position> {
        self.select(id, ComponentFlags::POSITION)
            .map(|i| &self.positions[i])
    }

    /// Mutate the `Position` of `id`, if it has one.
    #[inline]
    pub fn position_mut(&mut self, id: EntityId) -> Option<&mut Position> {
        match self.select(id, ComponentFlags::POSITION) {
            Some(i) => Some(&mut self.positions[i]),
            None => None,
        }
    }

    /// Read the `Sprite` of `id`, if it has one.
    #[inline]
    pub fn sprite(&self, id: EntityId) -> Option<&Sprite> {
        self.select(id, ComponentFlags::SPRITE)
            .map(|i| &self.sprites[i])
    }

    /// Mutate the `Sprite` of `id`, if it has one.
    #[inline]
    pub fn sprite_mut(&mut self, id: EntityId) -> Option<&mut Sprite> {
        match self.select(id, ComponentFlags::SPRITE) {
            Some(i) => Some(&mut self.sprites[i]),
            None => None,
        }
    }

    /// Read the `WorldBounds` of `id`, if it has them.
    #[inline]
    pub fn bounds(&self, id: EntityId) -> Option<&WorldBounds> {
        self.select(id, ComponentFlags::BOUNDS)
            .map(|i| &self.bounds[i])
    }

    /// Read the `Move` of `id`, if it has one.
    #[inline]
    pub fn movement(&self, id: EntityId) -> Option<&Move> {
        self.select(id, ComponentFlags::MOVE).map(|i| &self.moves[i])
    }

    /// Mutate the `Move` of `id`, if it has one.
    #[inline]
    pub fn movement_mut(&mut self, id: EntityId) -> Option<&mut Move> {
        match self.select(id, ComponentFlags::MOVE) {
            Some(i) => Some(&mut self.moves[i]),
            None => None,
        }
    }

    /// Borrow position and velocity of `id` together.
    #[inline]
    pub fn moving_mut(&mut self, id: EntityId) -> Option<(&mut Position, &mut Move)> {
        match self.select(id, ComponentFlags::POSITION | ComponentFlags::MOVE) {
            Some(i) => Some((&mut self.positions[i], &mut self.moves[i])),
            None => None,
        }
    }

    /// Borrow position, velocity and sprite of `id` together.
    #[inline]
    pub fn body_mut(&mut self, id: EntityId) -> Option<(&mut Position, &mut Move, &mut Sprite)> {
        let wanted = ComponentFlags::POSITION | ComponentFlags::MOVE | ComponentFlags::SPRITE;
        match self.select(id, wanted) {
            Some(i) => Some((
                &mut self.positions[i],
                &mut self.moves[i],
                &mut self.sprites[i],
            )),
            None => None,
        }
    }

    /// Iterate all entities carrying both a `Position` and a `Sprite`, in id order.
    #[inline]
    pub fn renderables(&self) -> Renderables {
        Renderables {
            store: self,
            index: 0,
        }
    }

    #[inline]
    fn select(&self, id: EntityId, wanted: ComponentFlags) -> Option<usize> {
        let index = id.index();
        if self.flags[index].contains(wanted) {
            Some(index)
        } else {
            None
        }
    }
}

/// Iterator over the drawable entities of a store.
pub struct Renderables<'a> {
    store: &'a EntityStore,
    index: usize,
}

impl<'a> Iterator for Renderables<'a> {
    type Item = (EntityId, &'a Position, &'a Sprite);

    fn next(&mut self) -> Option<Self::Item> {
        let wanted = ComponentFlags::POSITION | ComponentFlags::SPRITE;
        loop {
            let id = self.index;
            if id >= self.store.flags.len() {
                return None;
            }
            self.index += 1;
            if self.store.flags[id].contains(wanted) {
                return Some((
                    EntityId(id as u32),
                    &self.store.positions[id],
                    &self.store.sprites[id],
                ));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.store.flags.len() - self.index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense() {
        let mut store = EntityStore::new();
        let ids: Vec<_> = (0..4).map(|_| store.create_entity()).collect();
        assert_eq!(ids.iter().map(|id| id.index()).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(store.len(), 4);
        assert!(store.ids().eq(ids.into_iter()));
    }

    #[test]
    fn absent_components_are_hidden() {
        let mut store = EntityStore::new();
        let id = store.create_entity();
        assert!(store.flags(id).is_empty());
        assert!(store.position(id).is_none());
        assert!(store.sprite(id).is_none());
        assert!(store.bounds(id).is_none());
        assert!(store.movement(id).is_none());
        assert!(store.moving_mut(id).is_none());
    }

    #[test]
    fn reserve_keeps_storage_in_place() {
        let mut store = EntityStore::with_capacity(64);
        assert!(store.capacity() >= 64);
        let first = store.create_entity();
        store.add_position(first, Position::new(1.0, 1.0));
        let before = store.position(first).unwrap() as *const Position;
        for _ in 1..64 {
            store.create_entity();
        }
        let after = store.position(first).unwrap() as *const Position;
        assert_eq!(before, after);
    }

    #[test]
    fn growing_past_capacity_is_fine() {
        let mut store = EntityStore::with_capacity(1);
        for _ in 0..10 {
            let id = store.create_entity();
            store.add_move(id, Move::new(1.0, 0.0));
        }
        assert_eq!(store.len(), 10);
    }

    #[test]
    fn body_requires_all_three() {
        let mut store = EntityStore::new();
        let id = store.create_entity();
        store.add_position(id, Position::new(0.0, 0.0));
        store.add_move(id, Move::new(1.0, 1.0));
        assert!(store.moving_mut(id).is_some());
        assert!(store.body_mut(id).is_none());
        store.add_sprite(id, Sprite::white(0, 1.0));
        let (pos, mv, sprite) = store.body_mut(id).unwrap();
        pos.x = 2.0;
        mv.reverse();
        sprite.set_color([0.5, 0.5, 0.5]);
        assert_eq!(store.position(id).unwrap().x, 2.0);
        assert_eq!(store.movement(id), Some(&Move::new(-1.0, -1.0)));
        assert_eq!(store.sprite(id).unwrap().color(), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn renderables_skip_partial_entities() {
        let mut store = EntityStore::new();
        let bounds = store.create_entity();
        store.add_bounds(bounds, WorldBounds::default());
        let drawn = store.create_entity();
        store.add_position(drawn, Position::new(1.0, 2.0));
        store.add_sprite(drawn, Sprite::white(3, 1.0));
        let hidden = store.create_entity();
        store.add_sprite(hidden, Sprite::white(1, 1.0));
        let listed: Vec<_> = store.renderables().map(|(id, _, _)| id).collect();
        assert_eq!(listed, vec![drawn]);
    }
}
