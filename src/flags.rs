use std::fmt;

const POSITION_BIT: u8 = 0b0001;
const SPRITE_BIT: u8 = 0b0010;
const BOUNDS_BIT: u8 = 0b0100;
const MOVE_BIT: u8 = 0b1000;
const ALL_MASK: u8 = POSITION_BIT | SPRITE_BIT | BOUNDS_BIT | MOVE_BIT;

/// Set of components an entity carries.
///
/// One of these is stored per entity, next to the component arrays.
/// A cleared bit means the matching row holds a default value that must not be read.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct ComponentFlags(u8);

impl ComponentFlags {
    /// No components at all.
    pub const EMPTY: Self = ComponentFlags(0);
    /// `Position` is present.
    pub const POSITION: Self = ComponentFlags(POSITION_BIT);
    /// `Sprite` is present.
    pub const SPRITE: Self = ComponentFlags(SPRITE_BIT);
    /// `WorldBounds` is present.
    pub const BOUNDS: Self = ComponentFlags(BOUNDS_BIT);
    /// `Move` is present.
    pub const MOVE: Self = ComponentFlags(MOVE_BIT);

    /// Returns true if every flag of `other` is also set in `self`.
    #[inline]
    pub fn contains(&self, other: ComponentFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Sets all flags of `other`.
    #[inline]
    pub fn insert(&mut self, other: ComponentFlags) {
        debug_assert_eq!(other.0 & !ALL_MASK, 0);
        self.0 |= other.0;
    }

    /// Clears all flags of `other`.
    #[inline]
    pub fn remove(&mut self, other: ComponentFlags) {
        self.0 &= !other.0;
    }

    /// Returns true if no flag is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Raw bit representation.
    #[inline]
    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for ComponentFlags {
    type Output = ComponentFlags;
    #[inline]
    fn bitor(self, other: ComponentFlags) -> ComponentFlags {
        ComponentFlags(self.0 | other.0)
    }
}

impl fmt::Debug for ComponentFlags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names = [
            (Self::POSITION, "Position"),
            (Self::SPRITE, "Sprite"),
            (Self::BOUNDS, "WorldBounds"),
            (Self::MOVE, "Move"),
        ];
        f.debug_set()
            .entries(
                names
                    .iter()
                    .filter(|&&(flag, _)| self.contains(flag))
                    .map(|&(_, name)| name),
            )
            .finish()
    }
}
