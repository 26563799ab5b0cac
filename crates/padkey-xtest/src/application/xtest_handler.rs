//! XTest delivery backend.
//!
//! [`XTestEventHandler`] implements [`EventHandler`] on top of the
//! [`emitter`](super::emitter) and [`text_sequencer`](super::text_sequencer)
//! modules.  Every boundary method collapses errors to a debug-level log
//! line: a key missing from the layout, a character with no mapping, or a
//! missing connection means the action is dropped and the caller keeps
//! running.

use std::sync::Arc;

use padkey_core::{CharKeyMapper, InputActionSlot, UsLayoutCharMapper};
use tracing::{debug, info};

use super::emitter;
use super::event_handler::{DisplayRef, EmulationError, EventHandler};
use super::text_sequencer::TextSequencer;

/// Human-readable backend name.
pub const XTEST_NAME: &str = "XTest";

/// Registry identifier of the XTest backend.
pub const XTEST_IDENTIFIER: &str = "xtest";

/// Logs a dropped action.
fn drop_on_error(action: &str, result: Result<(), EmulationError>) {
    if let Err(e) = result {
        debug!(action, "input action dropped: {e}");
    }
}

/// Event handler that synthesizes input through the X11 XTest extension.
#[derive(Clone)]
pub struct XTestEventHandler {
    sequencer: TextSequencer,
}

impl XTestEventHandler {
    /// Creates a handler that types text using `mapper`.
    pub fn new(mapper: Arc<dyn CharKeyMapper>) -> Self {
        Self {
            sequencer: TextSequencer::new(mapper),
        }
    }
}

impl Default for XTestEventHandler {
    /// A handler using the US QWERTY character table.
    fn default() -> Self {
        Self::new(Arc::new(UsLayoutCharMapper::new()))
    }
}

impl EventHandler for XTestEventHandler {
    fn init(&self) -> bool {
        info!(backend = XTEST_IDENTIFIER, "event handler initialised");
        true
    }

    fn cleanup(&self) -> bool {
        info!(backend = XTEST_IDENTIFIER, "event handler cleaned up");
        true
    }

    fn send_keyboard_event(&self, display: DisplayRef<'_>, slot: &InputActionSlot, pressed: bool) {
        drop_on_error("key", emitter::try_emit_key(display, slot, pressed));
    }

    fn send_mouse_button_event(
        &self,
        display: DisplayRef<'_>,
        slot: &InputActionSlot,
        pressed: bool,
    ) {
        drop_on_error(
            "mouse button",
            emitter::try_emit_mouse_button(display, slot, pressed),
        );
    }

    fn send_mouse_event(&self, display: DisplayRef<'_>, dx: i32, dy: i32) {
        drop_on_error(
            "relative motion",
            emitter::try_emit_relative_motion(display, dx, dy),
        );
    }

    fn send_mouse_abs_event(&self, display: DisplayRef<'_>, x: i32, y: i32, screen: i32) {
        drop_on_error(
            "absolute motion",
            emitter::try_emit_absolute_motion(display, x, y, screen),
        );
    }

    // XTest has no spring mode.
    fn send_mouse_spring_event(&self, _display: DisplayRef<'_>, _dx: i32, _dy: i32) {}

    fn send_mouse_spring_event_sized(
        &self,
        _display: DisplayRef<'_>,
        _dx: i32,
        _dy: i32,
        _width: i32,
        _height: i32,
    ) {
    }

    fn send_text_entry_event(&self, display: DisplayRef<'_>, text: &str) {
        match self.sequencer.try_send_text(display, text) {
            Ok(report) if report.skipped > 0 => {
                debug!(typed = report.typed, skipped = report.skipped, "text entry incomplete");
            }
            Ok(_) => {}
            Err(e) => debug!("text entry dropped: {e}"),
        }
    }

    fn name(&self) -> &'static str {
        XTEST_NAME
    }

    fn identifier(&self) -> &'static str {
        XTEST_IDENTIFIER
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
