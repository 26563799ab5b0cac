//! Input action slots.
//!
//! A slot is the smallest unit of work a delivery backend understands: "this
//! key", "this mouse button", or "this kind of pointer motion".  The `code`
//! field is interpreted according to the `mode`:
//!
//! | Mode                   | Meaning of `code`                 |
//! |------------------------|-----------------------------------|
//! | `Keyboard`             | X11 KeySym (symbolic key id)      |
//! | `MouseButton`          | X11 button index (1 = left, ...)  |
//! | `MouseMotionRelative`  | unused by the emitter             |
//! | `MouseMotionAbsolute`  | unused by the emitter             |
//! | `None`                 | meaningless                       |

use serde::{Deserialize, Serialize};

/// Which kind of input a slot synthesizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotMode {
    Keyboard,
    MouseButton,
    MouseMotionRelative,
    MouseMotionAbsolute,
    #[default]
    None,
}

/// A tagged value describing one synthesizable action.
///
/// `code` is only meaningful when `mode != SlotMode::None`; see
/// [`InputActionSlot::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct InputActionSlot {
    mode: SlotMode,
    code: u32,
}

impl InputActionSlot {
    /// Creates a slot with an explicit mode and code.
    pub fn new(mode: SlotMode, code: u32) -> Self {
        Self { mode, code }
    }

    /// A keyboard slot for the given KeySym.
    pub fn keyboard(keysym: u32) -> Self {
        Self::new(SlotMode::Keyboard, keysym)
    }

    /// A mouse-button slot for the given X11 button index.
    pub fn mouse_button(button: u32) -> Self {
        Self::new(SlotMode::MouseButton, button)
    }

    /// An empty slot that no backend acts on.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SlotMode {
        self.mode
    }

    /// Returns the slot code, or `None` for a `SlotMode::None` slot.
    pub fn code(&self) -> Option<u32> {
        match self.mode {
            SlotMode::None => None,
            _ => Some(self.code),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
