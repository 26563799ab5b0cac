//! Domain entities for padkey.
//!
//! This module contains pure data types with no infrastructure dependencies.
//!
//! # What lives here? (for beginners)
//!
//! Everything in this module can be compiled and tested on any platform
//! without an X server.  The types describe *what* should be synthesized;
//! the `padkey-xtest` crate decides *how* it reaches the display server.

/// One synthesizable action: a key, a mouse button, or a pointer motion.
pub mod slot;

/// Logical keyboard modifiers and their canonical press order.
pub mod modifiers;

/// LIFO record of keys pressed for one composite keystroke.
pub mod press_stack;
