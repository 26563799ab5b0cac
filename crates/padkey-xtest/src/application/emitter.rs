//! Synthetic event emitter: one action in, one flushed event out.
//!
//! Every function here synthesizes at most one event and flushes the
//! connection before returning, so a caller that sees `Ok(())` knows the event
//! has left the process.  Nothing is batched or deferred.
//!
//! # Key resolution (for beginners)
//!
//! A `Keyboard` slot carries a KeySym, but XTest needs a keycode:
//!
//! ```text
//! slot.code (KeySym) → XKeysymToKeycode(display, keysym) → keycode
//! ```
//!
//! A keycode of `0` means "no key on the current layout produces this
//! KeySym".  That is reported as [`EmulationError::UnresolvedKeysym`] and no
//! event is synthesized: sending keycode 0 would be garbage.
//!
//! Mouse button slots need no resolution; the button index is passed through
//! unchanged (1 = left, 2 = middle, 3 = right, 4/5 = wheel, 8/9 = back/forward).

use padkey_core::{
    keymap::{keysym::NO_KEYCODE, KeyCode, KeySym},
    InputActionSlot, SlotMode,
};
use tracing::trace;

use super::event_handler::{DisplayConnection, DisplayRef, EmulationError};

/// Returns the borrowed connection, or `ConnectionUnavailable`.
pub fn require_display(display: DisplayRef<'_>) -> Result<&dyn DisplayConnection, EmulationError> {
    display.ok_or(EmulationError::ConnectionUnavailable)
}

/// Resolves `keysym` to a keycode through the live connection.
///
/// # Errors
///
/// Returns [`EmulationError::UnresolvedKeysym`] when the server reports no
/// keycode for `keysym`.
pub fn resolve_keycode(
    display: &dyn DisplayConnection,
    keysym: KeySym,
) -> Result<KeyCode, EmulationError> {
    match display.keysym_to_keycode(keysym) {
        NO_KEYCODE => Err(EmulationError::UnresolvedKeysym(keysym)),
        keycode => Ok(keycode),
    }
}

/// Returns the slot's code if it has the expected mode.
fn slot_code(slot: &InputActionSlot, expected: SlotMode) -> Result<u32, EmulationError> {
    match slot.code() {
        Some(code) if slot.mode() == expected => Ok(code),
        _ => Err(EmulationError::WrongSlotMode {
            expected,
            actual: slot.mode(),
        }),
    }
}

/// Presses or releases the key named by a `Keyboard` slot, then flushes.
///
/// # Errors
///
/// - [`EmulationError::ConnectionUnavailable`] if `display` is `None`.
/// - [`EmulationError::WrongSlotMode`] if the slot is not a keyboard slot.
/// - [`EmulationError::UnresolvedKeysym`] if the KeySym has no keycode.
/// - [`EmulationError::Platform`] if the server rejects the event.
pub fn try_emit_key(
    display: DisplayRef<'_>,
    slot: &InputActionSlot,
    pressed: bool,
) -> Result<(), EmulationError> {
    let display = require_display(display)?;
    let keysym = slot_code(slot, SlotMode::Keyboard)?;
    let keycode = resolve_keycode(display, keysym)?;

    trace!(keysym, keycode, pressed, "fake key event");
    display.fake_key_event(keycode, pressed)?;
    display.flush()
}

/// Presses or releases the button named by a `MouseButton` slot, then flushes.
///
/// # Errors
///
/// Same as [`try_emit_key`], minus key resolution.
pub fn try_emit_mouse_button(
    display: DisplayRef<'_>,
    slot: &InputActionSlot,
    pressed: bool,
) -> Result<(), EmulationError> {
    let display = require_display(display)?;
    let button = slot_code(slot, SlotMode::MouseButton)?;

    trace!(button, pressed, "fake button event");
    display.fake_button_event(button, pressed)?;
    display.flush()
}

/// Moves the pointer by `(dx, dy)`, then flushes.
///
/// # Errors
///
/// [`EmulationError::ConnectionUnavailable`] or [`EmulationError::Platform`].
pub fn try_emit_relative_motion(
    display: DisplayRef<'_>,
    dx: i32,
    dy: i32,
) -> Result<(), EmulationError> {
    let display = require_display(display)?;

    trace!(dx, dy, "fake relative motion");
    display.fake_relative_motion_event(dx, dy)?;
    display.flush()
}

/// Moves the pointer to `(x, y)` on `screen`, then flushes.
///
/// # Errors
///
/// [`EmulationError::ConnectionUnavailable`] or [`EmulationError::Platform`].
pub fn try_emit_absolute_motion(
    display: DisplayRef<'_>,
    x: i32,
    y: i32,
    screen: i32,
) -> Result<(), EmulationError> {
    let display = require_display(display)?;

    trace!(x, y, screen, "fake absolute motion");
    display.fake_motion_event(screen, x, y)?;
    display.flush()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::display::recording::{RecordedEvent, RecordingDisplay};
    use padkey_core::keymap::keysym::{XK_RETURN, XK_SHIFT_L};

    fn display() -> RecordingDisplay {
        RecordingDisplay::new()
            .with_keycode(XK_SHIFT_L, 50)
            .with_keycode(XK_RETURN, 36)
    }

    #[test]
    fn test_press_then_release_produces_two_flushed_key_events() {
        // Arrange
        let rec = display();
        let slot = InputActionSlot::keyboard(XK_SHIFT_L);

        // Act
        try_emit_key(Some(&rec), &slot, true).unwrap();
        try_emit_key(Some(&rec), &slot, false).unwrap();

        // Assert
        assert_eq!(
            rec.events(),
            vec![
                RecordedEvent::Key { keycode: 50, pressed: true },
                RecordedEvent::Flush,
                RecordedEvent::Key { keycode: 50, pressed: false },
                RecordedEvent::Flush,
            ]
        );
    }

    #[test]
    fn test_unresolvable_keysym_emits_nothing() {
        // Arrange – 0xFFC9 (F12) has no keycode in this display
        let rec = display();
        let slot = InputActionSlot::keyboard(0xFFC9);

        // Act
        let result = try_emit_key(Some(&rec), &slot, true);

        // Assert
        assert!(matches!(result, Err(EmulationError::UnresolvedKeysym(0xFFC9))));
        assert!(rec.events().is_empty());
    }

    #[test]
    fn test_key_with_mouse_button_slot_is_rejected() {
        let rec = display();

        let result = try_emit_key(Some(&rec), &InputActionSlot::mouse_button(1), true);

        assert!(matches!(
            result,
            Err(EmulationError::WrongSlotMode {
                expected: SlotMode::Keyboard,
                actual: SlotMode::MouseButton
            })
        ));
        assert!(rec.events().is_empty());
    }

    #[test]
    fn test_none_slot_is_rejected_even_with_matching_code() {
        let rec = display();
        let slot = InputActionSlot::new(SlotMode::None, XK_RETURN);

        assert!(try_emit_key(Some(&rec), &slot, true).is_err());
        assert!(rec.events().is_empty());
    }

    #[test]
    fn test_mouse_button_index_is_passed_through_unresolved() {
        let rec = display();

        try_emit_mouse_button(Some(&rec), &InputActionSlot::mouse_button(3), true).unwrap();

        assert_eq!(
            rec.events(),
            vec![
                RecordedEvent::Button { button: 3, pressed: true },
                RecordedEvent::Flush,
            ]
        );
    }

    #[test]
    fn test_relative_motion_emits_one_event_and_one_flush() {
        let rec = display();

        try_emit_relative_motion(Some(&rec), 5, -3).unwrap();

        assert_eq!(
            rec.events(),
            vec![
                RecordedEvent::RelativeMotion { dx: 5, dy: -3 },
                RecordedEvent::Flush,
            ]
        );
    }

    #[test]
    fn test_absolute_motion_targets_requested_screen() {
        let rec = display();

        try_emit_absolute_motion(Some(&rec), 640, 480, 1).unwrap();

        assert_eq!(
            rec.events(),
            vec![
                RecordedEvent::AbsoluteMotion { screen: 1, x: 640, y: 480 },
                RecordedEvent::Flush,
            ]
        );
    }

    #[test]
    fn test_missing_display_reports_connection_unavailable() {
        let slot = InputActionSlot::keyboard(XK_RETURN);

        assert!(matches!(
            try_emit_key(None, &slot, true),
            Err(EmulationError::ConnectionUnavailable)
        ));
        assert!(matches!(
            try_emit_relative_motion(None, 1, 1),
            Err(EmulationError::ConnectionUnavailable)
        ));
    }

    #[test]
    fn test_platform_failure_skips_flush() {
        // Arrange – the server rejects presses of keycode 36
        let rec = display().fail_press_of(36);
        let slot = InputActionSlot::keyboard(XK_RETURN);

        // Act
        let result = try_emit_key(Some(&rec), &slot, true);

        // Assert
        assert!(matches!(result, Err(EmulationError::Platform(_))));
        assert!(rec.events().is_empty());
    }
}
