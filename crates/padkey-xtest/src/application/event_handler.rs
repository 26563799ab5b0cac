//! Event handler contract shared by every delivery backend.
//!
//! A *delivery backend* is the code that turns an abstract action into
//! something the operating system's input stack observes.  This crate ships
//! the XTest backend ([`super::xtest_handler::XTestEventHandler`]); a
//! higher-level [`super::registry::BackendRegistry`] selects among
//! interchangeable backends by their identifier string.
//!
//! # The borrowed display connection
//!
//! Handlers never own the display connection.  Every operation receives a
//! [`DisplayRef`]: an optional borrow of whatever [`DisplayConnection`] the
//! process opened at startup.  `None` means "no connection is available" and
//! every operation degrades to a no-op.  Tests pass a
//! [`crate::infrastructure::display::recording::RecordingDisplay`] instead of a
//! live X server.
//!
//! # Failure policy
//!
//! Operations on [`EventHandler`] return nothing.  A key that is not on the
//! current layout, a character with no mapping, or a missing connection means
//! "this particular action did not happen" and is reported only through
//! `tracing` at debug level.  The fallible `try_*` functions in
//! [`super::emitter`] and [`super::text_sequencer`] expose the same failures as
//! [`EmulationError`] values for callers and tests that want to observe them.

use padkey_core::{
    keymap::{KeyCode, KeySym},
    InputActionSlot, SlotMode,
};
use thiserror::Error;

/// Error type for event synthesis operations.
#[derive(Debug, Error)]
pub enum EmulationError {
    /// No display connection was supplied.
    #[error("display connection unavailable")]
    ConnectionUnavailable,

    /// The display server has no keycode for this KeySym on the current layout.
    #[error("keysym {0:#06x} has no keycode on the current layout")]
    UnresolvedKeysym(KeySym),

    /// The character mapper has no key for this character.
    #[error("character {0:?} has no key mapping")]
    UnmappedCharacter(char),

    /// The slot describes a different kind of input than the operation sends.
    #[error("slot mode {actual:?} cannot be sent as {expected:?}")]
    WrongSlotMode { expected: SlotMode, actual: SlotMode },

    /// The display server rejected a request.
    #[error("platform error: {0}")]
    Platform(String),
}

/// A live connection to the display/input subsystem.
///
/// Implementations perform no batching of their own beyond what the
/// transport does: events are queued in call order and [`flush`] is a total
/// barrier that hands everything queued so far to the server.
///
/// [`flush`]: DisplayConnection::flush
pub trait DisplayConnection {
    /// Resolves a KeySym to the keycode of a key that produces it.
    ///
    /// Returns [`padkey_core::keymap::keysym::NO_KEYCODE`] when no key on the
    /// current layout produces `keysym`.
    fn keysym_to_keycode(&self, keysym: KeySym) -> KeyCode;

    /// Queues a synthetic key press or release.
    fn fake_key_event(&self, keycode: KeyCode, pressed: bool) -> Result<(), EmulationError>;

    /// Queues a synthetic pointer button press or release.
    fn fake_button_event(&self, button: u32, pressed: bool) -> Result<(), EmulationError>;

    /// Queues a pointer displacement relative to its current position.
    fn fake_relative_motion_event(&self, dx: i32, dy: i32) -> Result<(), EmulationError>;

    /// Queues an absolute pointer position on `screen` (`-1` = the pointer's screen).
    fn fake_motion_event(&self, screen: i32, x: i32, y: i32) -> Result<(), EmulationError>;

    /// Delivers every queued event before returning.
    fn flush(&self) -> Result<(), EmulationError>;
}

/// Optional borrow of the process-wide display connection.
pub type DisplayRef<'a> = Option<&'a dyn DisplayConnection>;

/// Backend-neutral contract for synthesizing input.
///
/// Each backend reports a fixed human-readable [`name`](EventHandler::name)
/// and a fixed machine [`identifier`](EventHandler::identifier).
pub trait EventHandler: Send + Sync {
    /// Prepares the backend for use.  Returns `false` if it cannot be used.
    fn init(&self) -> bool;

    /// Releases backend resources.  Returns `false` on failure.
    fn cleanup(&self) -> bool;

    /// Presses or releases the key named by a `Keyboard` slot.
    fn send_keyboard_event(&self, display: DisplayRef<'_>, slot: &InputActionSlot, pressed: bool);

    /// Presses or releases the button named by a `MouseButton` slot.
    fn send_mouse_button_event(
        &self,
        display: DisplayRef<'_>,
        slot: &InputActionSlot,
        pressed: bool,
    );

    /// Moves the pointer by `(dx, dy)` relative to its current position.
    fn send_mouse_event(&self, display: DisplayRef<'_>, dx: i32, dy: i32);

    /// Moves the pointer to `(x, y)` on `screen`.
    fn send_mouse_abs_event(&self, display: DisplayRef<'_>, x: i32, y: i32, screen: i32);

    /// Spring-centred pointer motion around the screen centre.
    fn send_mouse_spring_event(&self, display: DisplayRef<'_>, dx: i32, dy: i32);

    /// Spring-centred pointer motion within a `width` x `height` region.
    fn send_mouse_spring_event_sized(
        &self,
        display: DisplayRef<'_>,
        dx: i32,
        dy: i32,
        width: i32,
        height: i32,
    );

    /// Types `text` one character at a time.
    fn send_text_entry_event(&self, display: DisplayRef<'_>, text: &str);

    /// Human-readable backend name.
    fn name(&self) -> &'static str;

    /// Machine identifier used by the backend registry.
    fn identifier(&self) -> &'static str;

    /// Emits any diagnostics the backend deferred during start-up.
    fn print_post_messages(&self) {}
}

// ── Tests ─────────────────────────────────────────────────────────────────────
