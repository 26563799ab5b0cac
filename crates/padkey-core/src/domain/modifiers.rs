//! Logical keyboard modifiers.
//!
//! A [`ModifierSet`] is order-insensitive as a set, but when it is turned into
//! a sequence of key presses the order is fixed: Shift, Control, Alt, Meta.
//! [`ModifierSet::canonical_order`] is the only way to iterate a set, so every
//! caller presses modifiers in the same order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single logical modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    Shift,
    Control,
    Alt,
    Meta,
}

impl Modifier {
    /// All modifiers in canonical press order.
    pub const CANONICAL_ORDER: [Modifier; 4] =
        [Modifier::Shift, Modifier::Control, Modifier::Alt, Modifier::Meta];

    fn bit(self) -> u8 {
        match self {
            Modifier::Shift => ModifierSet::SHIFT,
            Modifier::Control => ModifierSet::CONTROL,
            Modifier::Alt => ModifierSet::ALT,
            Modifier::Meta => ModifierSet::META,
        }
    }
}

/// Set of modifiers required to produce a character.
///
/// Stored as a bit mask; the bit layout is private to this crate and never
/// crosses a process boundary.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ModifierSet(u8);

impl ModifierSet {
    pub const SHIFT: u8 = 1 << 0;
    pub const CONTROL: u8 = 1 << 1;
    pub const ALT: u8 = 1 << 2;
    pub const META: u8 = 1 << 3;

    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns a copy of this set with `modifier` added.
    #[must_use]
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.insert(modifier);
        self
    }

    pub fn insert(&mut self, modifier: Modifier) {
        self.0 |= modifier.bit();
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members of the set in the fixed press order Shift, Control, Alt, Meta.
    pub fn canonical_order(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::CANONICAL_ORDER
            .into_iter()
            .filter(move |m| self.contains(*m))
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl fmt::Debug for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.canonical_order()).finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
