//! Character-to-key mapping for text entry.
//!
//! Typing a character means pressing *some* key while holding *some*
//! modifiers.  On a US layout `'A'` is the `a` key with Shift held, `'!'` is
//! the `1` key with Shift held, and `'a'` is the `a` key alone.  The
//! [`CharKeyMapper`] trait is the seam between the text sequencer and
//! whatever layout knowledge is available; [`UsLayoutCharMapper`] is the
//! built-in table for a US QWERTY layout.
//!
//! # Why map to the *base* KeySym?
//!
//! The display server resolves a KeySym to the physical key that produces
//! it.  Asking for `XK_a` plus Shift is unambiguous on every layout that has
//! an `a` key; asking for `XK_A` still needs the caller to know that Shift
//! must be held, so the table always names the unshifted key and lists the
//! modifier explicitly.

use crate::domain::modifiers::{Modifier, ModifierSet};

use super::keysym::{
    char_to_keysym, KeySym, XK_BACKSPACE, XK_ESCAPE, XK_RETURN, XK_TAB,
};

/// The key that produces a character, and the modifiers that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharKeyInfo {
    pub keysym: KeySym,
    pub modifiers: ModifierSet,
}

impl CharKeyInfo {
    pub fn new(keysym: KeySym, modifiers: ModifierSet) -> Self {
        Self { keysym, modifiers }
    }

    /// A key typed without modifiers.
    pub fn plain(keysym: KeySym) -> Self {
        Self::new(keysym, ModifierSet::empty())
    }

    /// A key typed with Shift held.
    pub fn shifted(keysym: KeySym) -> Self {
        Self::new(keysym, ModifierSet::empty().with(Modifier::Shift))
    }
}

/// Maps one character to the key and modifiers that produce it.
pub trait CharKeyMapper: Send + Sync {
    /// Returns `None` if the character cannot be typed with this mapping.
    fn char_key_info(&self, ch: char) -> Option<CharKeyInfo>;
}

/// Character table for a US QWERTY keyboard layout.
///
/// Covers printable ASCII plus newline, carriage return, tab, backspace, and
/// escape.  Everything else is unmappable.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsLayoutCharMapper;

impl UsLayoutCharMapper {
    pub fn new() -> Self {
        Self
    }
}

impl CharKeyMapper for UsLayoutCharMapper {
    fn char_key_info(&self, ch: char) -> Option<CharKeyInfo> {
        let info = match ch {
            'a'..='z' | '0'..='9' => CharKeyInfo::plain(char_to_keysym(ch)),
            'A'..='Z' => CharKeyInfo::shifted(char_to_keysym(ch.to_ascii_lowercase())),

            ' ' | '-' | '=' | '[' | ']' | '\\' | ';' | '\'' | '`' | ',' | '.' | '/' => {
                CharKeyInfo::plain(char_to_keysym(ch))
            }

            '\n' | '\r' => CharKeyInfo::plain(XK_RETURN),
            '\t' => CharKeyInfo::plain(XK_TAB),
            '\u{8}' => CharKeyInfo::plain(XK_BACKSPACE),
            '\u{1b}' => CharKeyInfo::plain(XK_ESCAPE),

            _ => CharKeyInfo::shifted(char_to_keysym(shifted_base(ch)?)),
        };
        Some(info)
    }
}

/// The unshifted key that produces `ch` when Shift is held on a US layout.
fn shifted_base(ch: char) -> Option<char> {
    let base = match ch {
        '!' => '1',
        '@' => '2',
        '#' => '3',
        '$' => '4',
        '%' => '5',
        '^' => '6',
        '&' => '7',
        '*' => '8',
        '(' => '9',
        ')' => '0',
        '_' => '-',
        '+' => '=',
        '{' => '[',
        '}' => ']',
        '|' => '\\',
        ':' => ';',
        '"' => '\'',
        '~' => '`',
        '<' => ',',
        '>' => '.',
        '?' => '/',
        _ => return None,
    };
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(ch: char) -> Option<CharKeyInfo> {
        UsLayoutCharMapper::new().char_key_info(ch)
    }

    #[test]
    fn test_lowercase_letters_need_no_modifiers() {
        for ch in 'a'..='z' {
            let info = map(ch).expect("lowercase letter must map");
            assert_eq!(info.keysym, ch as u32);
            assert!(info.modifiers.is_empty(), "{ch:?} must not need modifiers");
        }
    }

    #[test]
    fn test_uppercase_letters_map_to_lowercase_key_with_shift() {
        for ch in 'A'..='Z' {
            let info = map(ch).expect("uppercase letter must map");
            assert_eq!(info.keysym, ch.to_ascii_lowercase() as u32);
            assert_eq!(info.modifiers, ModifierSet::empty().with(Modifier::Shift));
        }
    }

    #[test]
    fn test_shifted_digit_row_maps_to_digit_keys() {
        assert_eq!(map('!'), Some(CharKeyInfo::shifted('1' as u32)));
        assert_eq!(map(')'), Some(CharKeyInfo::shifted('0' as u32)));
        assert_eq!(map('@'), Some(CharKeyInfo::shifted('2' as u32)));
    }

    #[test]
    fn test_shifted_punctuation_maps_to_base_key() {
        assert_eq!(map('?'), Some(CharKeyInfo::shifted('/' as u32)));
        assert_eq!(map('"'), Some(CharKeyInfo::shifted('\'' as u32)));
        assert_eq!(map('|'), Some(CharKeyInfo::shifted('\\' as u32)));
    }

    #[test]
    fn test_every_printable_ascii_char_is_mappable() {
        for byte in 0x20u8..=0x7E {
            let ch = byte as char;
            assert!(map(ch).is_some(), "{ch:?} should be mappable");
        }
    }

    #[test]
    fn test_control_characters_map_to_function_keys() {
        assert_eq!(map('\n'), Some(CharKeyInfo::plain(XK_RETURN)));
        assert_eq!(map('\r'), Some(CharKeyInfo::plain(XK_RETURN)));
        assert_eq!(map('\t'), Some(CharKeyInfo::plain(XK_TAB)));
        assert_eq!(map('\u{8}'), Some(CharKeyInfo::plain(XK_BACKSPACE)));
    }

    #[test]
    fn test_non_ascii_chars_are_unmappable() {
        assert_eq!(map('é'), None);
        assert_eq!(map('€'), None);
        assert_eq!(map('\u{0}'), None);
    }
}
