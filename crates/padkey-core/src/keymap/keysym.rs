//! X11 KeySym constants and KeySym parsing.
//!
//! X11 KeySym values are defined in X11/keysymdef.h.
//! Reference: https://gitlab.freedesktop.org/xorg/proto/xorgproto/-/blob/master/include/X11/keysymdef.h
//!
//! # What is an X11 KeySym? (for beginners)
//!
//! A **KeySym** (Key Symbol) is the display server's *symbolic* name for a
//! key.  It is independent of the physical keyboard:
//!
//! | KeySym name    | Value  | Meaning        |
//! |----------------|--------|----------------|
//! | `XK_a`         | 0x0061 | lowercase 'a'  |
//! | `XK_Return`    | 0xFF0D | Enter key      |
//! | `XK_Shift_L`   | 0xFFE1 | left Shift     |
//!
//! Latin-1 characters use their code point as KeySym (0x61 = 'a').  Other
//! Unicode characters use `0x0100_0000 | code point`.
//!
//! A KeySym is **not** what the XTest extension wants.  `XTestFakeKeyEvent`
//! takes a *keycode*: the hardware-dependent scan code the server assigned to
//! whichever physical key currently produces that KeySym.  The conversion
//! happens at dispatch time through a live display connection:
//!
//! ```text
//! KeySym → XKeysymToKeycode(display, keysym) → keycode (0 = not on this layout)
//! ```

use thiserror::Error;

use crate::domain::modifiers::Modifier;

/// Symbolic key identifier (X11 KeySym).
pub type KeySym = u32;

/// Hardware key code assigned by the display server.  `0` is never valid.
pub type KeyCode = u8;

/// The keycode value the display server returns for "no such key".
pub const NO_KEYCODE: KeyCode = 0;

// ── KeySym constants ──────────────────────────────────────────────────────────

pub const XK_BACKSPACE: KeySym = 0xFF08;
pub const XK_TAB: KeySym = 0xFF09;
pub const XK_RETURN: KeySym = 0xFF0D;
pub const XK_ESCAPE: KeySym = 0xFF1B;
pub const XK_DELETE: KeySym = 0xFFFF;
pub const XK_SPACE: KeySym = 0x0020;

pub const XK_HOME: KeySym = 0xFF50;
pub const XK_LEFT: KeySym = 0xFF51;
pub const XK_UP: KeySym = 0xFF52;
pub const XK_RIGHT: KeySym = 0xFF53;
pub const XK_DOWN: KeySym = 0xFF54;
pub const XK_PAGE_UP: KeySym = 0xFF55;
pub const XK_PAGE_DOWN: KeySym = 0xFF56;
pub const XK_END: KeySym = 0xFF57;

pub const XK_F1: KeySym = 0xFFBE;
pub const XK_F2: KeySym = 0xFFBF;
pub const XK_F3: KeySym = 0xFFC0;
pub const XK_F4: KeySym = 0xFFC1;
pub const XK_F5: KeySym = 0xFFC2;
pub const XK_F6: KeySym = 0xFFC3;
pub const XK_F7: KeySym = 0xFFC4;
pub const XK_F8: KeySym = 0xFFC5;
pub const XK_F9: KeySym = 0xFFC6;
pub const XK_F10: KeySym = 0xFFC7;
pub const XK_F11: KeySym = 0xFFC8;
pub const XK_F12: KeySym = 0xFFC9;

pub const XK_SHIFT_L: KeySym = 0xFFE1;
pub const XK_CONTROL_L: KeySym = 0xFFE3;
pub const XK_META_L: KeySym = 0xFFE7;
pub const XK_ALT_L: KeySym = 0xFFE9;
pub const XK_SUPER_L: KeySym = 0xFFEB;

/// Offset added to a Unicode code point above Latin-1 to form its KeySym.
pub const UNICODE_KEYSYM_OFFSET: KeySym = 0x0100_0000;

impl Modifier {
    /// The left-hand KeySym pressed to activate this modifier.
    pub fn keysym(self) -> KeySym {
        match self {
            Modifier::Shift => XK_SHIFT_L,
            Modifier::Control => XK_CONTROL_L,
            Modifier::Alt => XK_ALT_L,
            Modifier::Meta => XK_META_L,
        }
    }
}

/// Returns the KeySym that names character `ch` directly.
pub fn char_to_keysym(ch: char) -> KeySym {
    let cp = ch as u32;
    match cp {
        0x20..=0x7E | 0xA0..=0xFF => cp,
        _ => UNICODE_KEYSYM_OFFSET | cp,
    }
}

/// Named KeySyms accepted by [`parse_keysym`].
pub const NAMED_KEYSYMS: &[(&str, KeySym)] = &[
    ("BackSpace", XK_BACKSPACE),
    ("Tab", XK_TAB),
    ("Return", XK_RETURN),
    ("Escape", XK_ESCAPE),
    ("Delete", XK_DELETE),
    ("space", XK_SPACE),
    ("Shift_L", XK_SHIFT_L),
    ("Control_L", XK_CONTROL_L),
    ("Meta_L", XK_META_L),
    ("Alt_L", XK_ALT_L),
    ("Super_L", XK_SUPER_L),
    ("Left", XK_LEFT),
    ("Up", XK_UP),
    ("Right", XK_RIGHT),
    ("Down", XK_DOWN),
    ("Home", XK_HOME),
    ("End", XK_END),
    ("Page_Up", XK_PAGE_UP),
    ("Page_Down", XK_PAGE_DOWN),
    ("F1", XK_F1),
    ("F2", XK_F2),
    ("F3", XK_F3),
    ("F4", XK_F4),
    ("F5", XK_F5),
    ("F6", XK_F6),
    ("F7", XK_F7),
    ("F8", XK_F8),
    ("F9", XK_F9),
    ("F10", XK_F10),
    ("F11", XK_F11),
    ("F12", XK_F12),
];

/// Error returned when a KeySym string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeysymParseError {
    #[error("empty keysym")]
    Empty,
    #[error("unrecognised keysym: {0:?}")]
    Unrecognised(String),
}

/// Parses a KeySym from user input.
///
/// Accepted forms, tried in order:
/// - `0x`-prefixed hexadecimal (`0xFFE1`)
/// - a single character (`a`, `é`, `7`)
/// - decimal (`65505`)
/// - an X11 KeySym name from [`NAMED_KEYSYMS`] (`Shift_L`, `Return`)
///
/// # Errors
///
/// Returns [`KeysymParseError`] if the input matches none of the forms.
pub fn parse_keysym(input: &str) -> Result<KeySym, KeysymParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(KeysymParseError::Empty);
    }

    if let Some(hex) = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        return KeySym::from_str_radix(hex, 16)
            .map_err(|_| KeysymParseError::Unrecognised(input.to_string()));
    }

    let mut chars = input.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        // A lone digit is a character, not the decimal KeySym 0..9.
        return Ok(char_to_keysym(ch));
    }

    if let Ok(value) = input.parse::<KeySym>() {
        return Ok(value);
    }

    NAMED_KEYSYMS
        .iter()
        .find(|(name, _)| *name == input)
        .map(|(_, keysym)| *keysym)
        .ok_or_else(|| KeysymParseError::Unrecognised(input.to_string()))
}
