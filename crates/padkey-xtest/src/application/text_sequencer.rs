//! Text sequencer: types a string one composite keystroke at a time.
//!
//! For every character the sequencer:
//!
//! 1. Asks the [`CharKeyMapper`] for the character's KeySym and modifiers.
//! 2. Resolves every keycode it will need (modifiers in canonical order
//!    Shift, Control, Alt, Meta, then the character key).  If any keycode
//!    is missing the character is skipped and *no* event is emitted.
//! 3. Presses the modifiers, then the character key, pushing each keycode on
//!    a [`PressStack`], and flushes.
//! 4. Drains the stack, releasing the character key first and the first
//!    modifier last, and flushes.
//!
//! Typing `"Ab"` on a US layout therefore produces:
//!
//! ```text
//! Shift↓ a↓ [flush] a↑ Shift↑ [flush] b↓ [flush] b↑ [flush]
//! ```
//!
//! A fresh stack is used for every character, so no modifier state leaks
//! from one character into the next or from one call into the next.  If the
//! server rejects an event halfway through the press phase, everything already
//! pressed is still released before the sequencer moves on.

use std::sync::Arc;

use padkey_core::{keymap::KeyCode, CharKeyMapper, PressStack};
use tracing::{debug, trace, warn};

use super::emitter::{require_display, resolve_keycode};
use super::event_handler::{DisplayConnection, DisplayRef, EmulationError};

/// Keycodes needed to type one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeystrokePlan {
    /// Modifier keycodes in canonical press order.
    pub modifiers: Vec<KeyCode>,
    /// The character's own keycode, pressed after every modifier.
    pub key: KeyCode,
}

impl KeystrokePlan {
    /// Keycodes in press order.
    pub fn press_order(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.modifiers.iter().copied().chain(std::iter::once(self.key))
    }

    /// Number of keys pressed (and released) for this character.
    pub fn len(&self) -> usize {
        self.modifiers.len() + 1
    }
}

/// Outcome of typing one string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextEntryReport {
    /// Characters whose full press/release sequence was delivered.
    pub typed: usize,
    /// Characters that produced no complete keystroke.
    pub skipped: usize,
}

/// Types strings through a [`DisplayConnection`].
#[derive(Clone)]
pub struct TextSequencer {
    mapper: Arc<dyn CharKeyMapper>,
}

impl TextSequencer {
    pub fn new(mapper: Arc<dyn CharKeyMapper>) -> Self {
        Self { mapper }
    }

    /// Maps and resolves `ch` without emitting anything.
    ///
    /// # Errors
    ///
    /// - [`EmulationError::UnmappedCharacter`] if the mapper has no entry.
    /// - [`EmulationError::UnresolvedKeysym`] if the character key or any
    ///   required modifier has no keycode on the current layout.
    pub fn plan_char(
        &self,
        display: &dyn DisplayConnection,
        ch: char,
    ) -> Result<KeystrokePlan, EmulationError> {
        let info = self
            .mapper
            .char_key_info(ch)
            .ok_or(EmulationError::UnmappedCharacter(ch))?;

        let key = resolve_keycode(display, info.keysym)?;
        let modifiers = info
            .modifiers
            .canonical_order()
            .map(|modifier| resolve_keycode(display, modifier.keysym()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(KeystrokePlan { modifiers, key })
    }

    /// Types a single character: press phase, flush, release phase, flush.
    ///
    /// # Errors
    ///
    /// Any error from [`plan_char`](Self::plan_char) (nothing emitted), or
    /// [`EmulationError::Platform`] if the server rejects an event.  In the
    /// latter case every key already pressed has been released.
    pub fn try_send_char(
        &self,
        display: &dyn DisplayConnection,
        ch: char,
    ) -> Result<(), EmulationError> {
        let plan = self.plan_char(display, ch)?;
        trace!(?ch, ?plan, "typing character");
        type_keystroke(display, &plan)
    }

    /// Types `text` character by character.
    ///
    /// Characters that cannot be typed are skipped; the rest of the string is
    /// still typed.
    ///
    /// # Errors
    ///
    /// Returns [`EmulationError::ConnectionUnavailable`] if `display` is `None`.
    pub fn try_send_text(
        &self,
        display: DisplayRef<'_>,
        text: &str,
    ) -> Result<TextEntryReport, EmulationError> {
        let display = require_display(display)?;
        let mut report = TextEntryReport::default();

        for ch in text.chars() {
            match self.try_send_char(display, ch) {
                Ok(()) => report.typed += 1,
                Err(e) => {
                    debug!(?ch, "skipping character: {e}");
                    report.skipped += 1;
                }
            }
        }

        Ok(report)
    }
}

/// Presses every key in `plan`, flushes, then releases them in reverse.
fn type_keystroke(
    display: &dyn DisplayConnection,
    plan: &KeystrokePlan,
) -> Result<(), EmulationError> {
    let mut stack = PressStack::with_capacity(plan.len());

    let pressed = plan
        .press_order()
        .try_for_each(|keycode| {
            display.fake_key_event(keycode, true)?;
            stack.push(keycode);
            Ok(())
        })
        .and_then(|()| display.flush());

    if let Err(e) = &pressed {
        warn!(
            held = stack.len(),
            "press phase failed, releasing held keys: {e}"
        );
    }

    let released = release_all(display, &mut stack);
    pressed.and(released)
}

/// Releases everything on `stack` in LIFO order and flushes once.
///
/// Keeps releasing after a failed release so one rejected event cannot leave
/// the remaining keys held.
fn release_all(display: &dyn DisplayConnection, stack: &mut PressStack) -> Result<(), EmulationError> {
    let mut first_error = None;

    for keycode in stack.drain_release_order() {
        if let Err(e) = display.fake_key_event(keycode, false) {
            warn!(keycode, "release rejected, releasing remaining keys: {e}");
            first_error.get_or_insert(e);
        }
    }

    let flushed = display.flush();
    match first_error {
        Some(e) => Err(e),
        None => flushed,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
