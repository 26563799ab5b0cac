//! In-memory display connection that records instead of delivering.
//!
//! # Why a recording display?
//!
//! The real [`X11Display`](super::linux::X11Display) talks to an X server
//! that:
//!
//! - Must be running and reachable through `$DISPLAY`.
//! - Actually moves the cursor or presses keys on the test machine.
//! - Cannot be observed directly from Rust test code.
//!
//! `RecordingDisplay` replaces all server calls with simple in-memory
//! recording.  Every synthesized event *and every flush* is pushed onto one
//! ordered log so assertions can check exactly what was emitted, in what
//! order, and where the flush barriers fell.  The `padkey --dry-run` command
//! prints the same log.
//!
//! # Usage in tests
//!
//! ```ignore
//! let rec = RecordingDisplay::new().with_keycode(XK_SHIFT_L, 50);
//! handler.send_keyboard_event(Some(&rec), &InputActionSlot::keyboard(XK_SHIFT_L), true);
//!
//! assert_eq!(
//!     rec.events(),
//!     vec![RecordedEvent::Key { keycode: 50, pressed: true }, RecordedEvent::Flush],
//! );
//! ```
//!
//! # Failure injection
//!
//! [`RecordingDisplay::fail_press_of`], [`RecordingDisplay::fail_release_of`]
//! and [`RecordingDisplay::fail_flush_at`] make the display reject a press, a
//! release, or the n-th flush with an `EmulationError::Platform`.  Rejected
//! events and flushes are not recorded.  This lets tests cover every
//! forced-release path of the text sequencer without a misbehaving X server.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use padkey_core::keymap::{
    keysym::{self, NO_KEYCODE},
    KeyCode, KeySym,
};

use crate::application::event_handler::{DisplayConnection, EmulationError};

/// One entry in the recorded event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedEvent {
    Key { keycode: KeyCode, pressed: bool },
    Button { button: u32, pressed: bool },
    RelativeMotion { dx: i32, dy: i32 },
    AbsoluteMotion { screen: i32, x: i32, y: i32 },
    Flush,
}

impl fmt::Display for RecordedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = |pressed: bool| if pressed { "press" } else { "release" };
        match self {
            RecordedEvent::Key { keycode, pressed } => {
                write!(f, "key     {keycode:>3} {}", dir(*pressed))
            }
            RecordedEvent::Button { button, pressed } => {
                write!(f, "button  {button:>3} {}", dir(*pressed))
            }
            RecordedEvent::RelativeMotion { dx, dy } => write!(f, "motion  rel ({dx}, {dy})"),
            RecordedEvent::AbsoluteMotion { screen, x, y } => {
                write!(f, "motion  abs ({x}, {y}) screen {screen}")
            }
            RecordedEvent::Flush => write!(f, "flush"),
        }
    }
}

/// A display connection that records every call.
///
/// Keycode resolution uses an explicit KeySym → keycode table; KeySyms not
/// in the table resolve to keycode 0, like keys missing from a real layout.
#[derive(Default)]
pub struct RecordingDisplay {
    keycodes: HashMap<KeySym, KeyCode>,
    failing_presses: HashSet<KeyCode>,
    failing_releases: HashSet<KeyCode>,
    failing_flush: Option<usize>,
    flushes: AtomicUsize,
    events: Mutex<Vec<RecordedEvent>>,
}

/// X keycodes (evdev + 8) of a US QWERTY keyboard, by the character each
/// key produces without modifiers.
const US_QWERTY_CHAR_KEYCODES: &[(char, KeyCode)] = &[
    ('1', 10), ('2', 11), ('3', 12), ('4', 13), ('5', 14),
    ('6', 15), ('7', 16), ('8', 17), ('9', 18), ('0', 19),
    ('-', 20), ('=', 21),
    ('q', 24), ('w', 25), ('e', 26), ('r', 27), ('t', 28),
    ('y', 29), ('u', 30), ('i', 31), ('o', 32), ('p', 33),
    ('[', 34), (']', 35),
    ('a', 38), ('s', 39), ('d', 40), ('f', 41), ('g', 42),
    ('h', 43), ('j', 44), ('k', 45), ('l', 46), (';', 47),
    ('\'', 48), ('`', 49), ('\\', 51),
    ('z', 52), ('x', 53), ('c', 54), ('v', 55), ('b', 56),
    ('n', 57), ('m', 58), (',', 59), ('.', 60), ('/', 61),
    (' ', 65),
];

/// X keycodes of the non-character keys on a US QWERTY keyboard.
const US_QWERTY_KEYSYM_KEYCODES: &[(KeySym, KeyCode)] = &[
    (keysym::XK_ESCAPE, 9),
    (keysym::XK_BACKSPACE, 22),
    (keysym::XK_TAB, 23),
    (keysym::XK_RETURN, 36),
    (keysym::XK_CONTROL_L, 37),
    (keysym::XK_SHIFT_L, 50),
    (keysym::XK_ALT_L, 64),
    (keysym::XK_HOME, 110),
    (keysym::XK_UP, 111),
    (keysym::XK_PAGE_UP, 112),
    (keysym::XK_LEFT, 113),
    (keysym::XK_RIGHT, 114),
    (keysym::XK_END, 115),
    (keysym::XK_DOWN, 116),
    (keysym::XK_PAGE_DOWN, 117),
    (keysym::XK_DELETE, 119),
    (keysym::XK_F1, 67),
    (keysym::XK_F2, 68),
    (keysym::XK_F3, 69),
    (keysym::XK_F4, 70),
    (keysym::XK_F5, 71),
    (keysym::XK_F6, 72),
    (keysym::XK_F7, 73),
    (keysym::XK_F8, 74),
    (keysym::XK_F9, 75),
    (keysym::XK_F10, 76),
    (keysym::XK_F11, 95),
    (keysym::XK_F12, 96),
    (keysym::XK_SUPER_L, 133),
    (keysym::XK_META_L, 205),
];

impl RecordingDisplay {
    /// Creates a display with an empty keycode table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a display whose keycode table matches a US QWERTY keyboard.
    pub fn us_qwerty() -> Self {
        let chars = US_QWERTY_CHAR_KEYCODES
            .iter()
            .map(|&(ch, code)| (keysym::char_to_keysym(ch), code));
        let keys = US_QWERTY_KEYSYM_KEYCODES.iter().copied();

        chars
            .chain(keys)
            .fold(Self::new(), |display, (sym, code)| display.with_keycode(sym, code))
    }

    /// Maps `keysym` to `keycode`.
    #[must_use]
    pub fn with_keycode(mut self, keysym: KeySym, keycode: KeyCode) -> Self {
        self.keycodes.insert(keysym, keycode);
        self
    }

    /// Rejects every press of `keycode` with a platform error.
    #[must_use]
    pub fn fail_press_of(mut self, keycode: KeyCode) -> Self {
        self.failing_presses.insert(keycode);
        self
    }

    /// Rejects every release of `keycode` with a platform error.
    #[must_use]
    pub fn fail_release_of(mut self, keycode: KeyCode) -> Self {
        self.failing_releases.insert(keycode);
        self
    }

    /// Rejects the `n`-th flush (0-based) with a platform error.
    #[must_use]
    pub fn fail_flush_at(mut self, n: usize) -> Self {
        self.failing_flush = Some(n);
        self
    }

    /// Snapshot of the event log, oldest first.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.log().clone()
    }

    fn log(&self) -> std::sync::MutexGuard<'_, Vec<RecordedEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, event: RecordedEvent) -> Result<(), EmulationError> {
        self.log().push(event);
        Ok(())
    }
}

impl DisplayConnection for RecordingDisplay {
    fn keysym_to_keycode(&self, keysym: KeySym) -> KeyCode {
        self.keycodes.get(&keysym).copied().unwrap_or(NO_KEYCODE)
    }

    fn fake_key_event(&self, keycode: KeyCode, pressed: bool) -> Result<(), EmulationError> {
        let rejected = if pressed {
            &self.failing_presses
        } else {
            &self.failing_releases
        };
        if rejected.contains(&keycode) {
            let dir = if pressed { "press" } else { "release" };
            return Err(EmulationError::Platform(format!(
                "recording display rejected {dir} of keycode {keycode}"
            )));
        }
        self.record(RecordedEvent::Key { keycode, pressed })
    }

    fn fake_button_event(&self, button: u32, pressed: bool) -> Result<(), EmulationError> {
        self.record(RecordedEvent::Button { button, pressed })
    }

    fn fake_relative_motion_event(&self, dx: i32, dy: i32) -> Result<(), EmulationError> {
        self.record(RecordedEvent::RelativeMotion { dx, dy })
    }

    fn fake_motion_event(&self, screen: i32, x: i32, y: i32) -> Result<(), EmulationError> {
        self.record(RecordedEvent::AbsoluteMotion { screen, x, y })
    }

    fn flush(&self) -> Result<(), EmulationError> {
        let n = self.flushes.fetch_add(1, Ordering::Relaxed);
        if self.failing_flush == Some(n) {
            return Err(EmulationError::Platform(format!(
                "recording display rejected flush #{n}"
            )));
        }
        self.record(RecordedEvent::Flush)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
