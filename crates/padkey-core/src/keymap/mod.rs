//! KeySym tables and character-to-key translation.
//!
//! The canonical key representation in padkey is the X11 KeySym.  KeySyms are
//! symbolic and layout independent; they are resolved to hardware keycodes
//! only at dispatch time, through a live display connection owned by the
//! delivery backend.

pub mod char_map;
pub mod keysym;

pub use char_map::{CharKeyInfo, CharKeyMapper, UsLayoutCharMapper};
pub use keysym::{KeyCode, KeySym};
