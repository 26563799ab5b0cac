//! # padkey-core
//!
//! Shared library for padkey containing the input action slot model, the
//! modifier set and press stack used by text entry, and the
//! character-to-keysym translation tables.
//!
//! This crate has zero dependencies on OS APIs, display servers, or UI
//! frameworks.  The XTest delivery backend lives in `padkey-xtest`.
//!
//! # Architecture overview (for beginners)
//!
//! padkey turns *abstract* input actions ("press the key named Shift_L",
//! "type the text `Hello`", "move the pointer 5 px right") into *synthetic*
//! low-level events that the display server delivers to the focused window as
//! if a physical keyboard or mouse produced them.
//!
//! This crate (`padkey-core`) is the shared foundation.  It defines:
//!
//! - **`domain`** – Pure data types with no OS dependencies: the
//!   [`InputActionSlot`] that describes one synthesizable action, the
//!   [`ModifierSet`] required to produce a character, and the [`PressStack`]
//!   that guarantees keys are released in reverse press order.
//!
//! - **`keymap`** – X11 KeySym constants and the [`CharKeyMapper`] seam that
//!   turns a character into the key (and modifiers) that produce it.

pub mod domain;
pub mod keymap;

// Re-export the most-used types at the crate root so callers can write
// `padkey_core::ModifierSet` instead of `padkey_core::domain::modifiers::ModifierSet`.
pub use domain::modifiers::{Modifier, ModifierSet};
pub use domain::press_stack::PressStack;
pub use domain::slot::{InputActionSlot, SlotMode};
pub use keymap::char_map::{CharKeyInfo, CharKeyMapper, UsLayoutCharMapper};
pub use keymap::keysym::{parse_keysym, KeySym, KeysymParseError};
