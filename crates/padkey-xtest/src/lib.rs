//! padkey-xtest library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does padkey-xtest do? (for beginners)
//!
//! It injects *synthetic* keyboard and mouse input into an X11 session
//! through the XTest extension.  The events look to every application exactly
//! like input from a physical keyboard or mouse.
//!
//! The crate offers:
//!
//! 1. Single events: press or release one key or mouse button, move the
//!    pointer by a relative offset, or warp it to an absolute position.
//! 2. Text entry: type an arbitrary string, pressing Shift/Control/Alt/Meta
//!    as each character requires and always releasing them again.
//! 3. A small backend registry so callers select "xtest" by name rather than
//!    by type.
//!
//! Failures to resolve a key are not errors at the handler boundary: the
//! affected action is skipped, logged at debug level, and the caller keeps
//! running.

/// Application layer: handler contract, XTest backend, registry, dispatch.
pub mod application;

/// Infrastructure layer: display connections and configuration.
pub mod infrastructure;
