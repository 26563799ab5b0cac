//! Integration tests for the padkey-core public API.
//!
//! These tests combine the character mapper, the modifier set, and the press
//! stack the same way the text sequencer does, without a display server.

use padkey_core::{
    keymap::keysym::{KeyCode, XK_RETURN, XK_SHIFT_L},
    CharKeyMapper, InputActionSlot, Modifier, PressStack, SlotMode, UsLayoutCharMapper,
};

/// Builds the press order and release order for one character, using the
/// low byte of each KeySym as a stand-in keycode.
fn press_release(ch: char) -> Option<(Vec<KeyCode>, Vec<KeyCode>)> {
    let info = UsLayoutCharMapper::new().char_key_info(ch)?;
    let mut stack = PressStack::new();
    for modifier in info.modifiers.canonical_order() {
        stack.push(modifier.keysym() as KeyCode);
    }
    stack.push(info.keysym as KeyCode);
    let pressed = stack.pressed().to_vec();
    let released = stack.drain_release_order().collect();
    Some((pressed, released))
}

#[test]
fn test_uppercase_letter_presses_shift_first_and_releases_it_last() {
    let (pressed, released) = press_release('A').expect("'A' must map");

    assert_eq!(pressed, vec![XK_SHIFT_L as KeyCode, b'a']);
    assert_eq!(released, vec![b'a', XK_SHIFT_L as KeyCode]);
}

#[test]
fn test_plain_character_presses_exactly_one_key() {
    let (pressed, released) = press_release('\n').expect("newline must map");

    assert_eq!(pressed, vec![XK_RETURN as KeyCode]);
    assert_eq!(released, pressed);
}

#[test]
fn test_release_order_is_reverse_of_press_order_for_all_printable_ascii() {
    for byte in 0x20u8..=0x7E {
        let (mut pressed, released) = press_release(byte as char).expect("printable ASCII maps");
        pressed.reverse();
        assert_eq!(pressed, released, "LIFO violated for {:?}", byte as char);
    }
}

#[test]
fn test_modifier_set_from_mapper_iterates_canonically() {
    let info = UsLayoutCharMapper::new()
        .char_key_info('~')
        .expect("'~' must map");

    let modifiers: Vec<Modifier> = info.modifiers.canonical_order().collect();

    assert_eq!(modifiers, vec![Modifier::Shift]);
}

#[test]
fn test_slot_round_trips_through_toml_table() {
    #[derive(serde::Serialize, serde::Deserialize)]
    struct Binding {
        slot: InputActionSlot,
    }

    let binding = Binding {
        slot: InputActionSlot::keyboard(XK_RETURN),
    };

    let text = toml::to_string(&binding).expect("serialize");
    let back: Binding = toml::from_str(&text).expect("deserialize");

    assert_eq!(back.slot.mode(), SlotMode::Keyboard);
    assert_eq!(back.slot.code(), Some(XK_RETURN));
}
