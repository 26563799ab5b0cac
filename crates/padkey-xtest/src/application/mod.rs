//! Application layer: the event handler contract and the XTest backend.
//!
//! # What lives here? (for beginners)
//!
//! - **`event_handler`** – The `EventHandler` trait every delivery backend
//!   implements, the `DisplayConnection` trait a borrowed display connection
//!   implements, and the `EmulationError` type.
//!
//! - **`emitter`** – Single key, button, and pointer-motion events, each
//!   followed by a flush so the display server sees it immediately.
//!
//! - **`text_sequencer`** – Types a string one character at a time: press the
//!   required modifiers in a fixed order, press the character key, flush,
//!   then release everything in reverse order and flush again.
//!
//! - **`xtest_handler`** – `XTestEventHandler`, which combines the emitter and
//!   the sequencer behind the `EventHandler` trait.
//!
//! - **`registry`** – Picks a backend by its identifier string (`"xtest"`).
//!
//! - **`dispatch`** – Routes an abstract `InputAction` (from the CLI or a
//!   script file) to the selected backend.

pub mod dispatch;
pub mod emitter;
pub mod event_handler;
pub mod registry;
pub mod text_sequencer;
pub mod xtest_handler;
