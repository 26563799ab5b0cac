//! LIFO record of pressed keys.
//!
//! During the press phase of a composite keystroke (modifiers first, then the
//! character key) every resolved key code is pushed here.  The release phase
//! drains the stack, so the character key is released first and the first
//! modifier pressed is released last.  No receiving application ever sees a
//! modifier released while the key it modifies is still down.

use crate::keymap::keysym::KeyCode;

/// Ordered sequence of resolved key codes, released in reverse push order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PressStack {
    codes: Vec<KeyCode>,
}

impl PressStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty stack with room for `capacity` codes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            codes: Vec::with_capacity(capacity),
        }
    }

    /// Records a pressed key.
    pub fn push(&mut self, code: KeyCode) {
        self.codes.push(code);
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes in press order, oldest first.
    pub fn pressed(&self) -> &[KeyCode] {
        &self.codes
    }

    /// Empties the stack, yielding codes in release order (last pushed first).
    pub fn drain_release_order(&mut self) -> impl Iterator<Item = KeyCode> + '_ {
        self.codes.drain(..).rev()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
