//! DispatchInputUseCase: routes abstract input actions to a delivery backend.
//!
//! This use case sits at the application layer and delegates to an
//! [`EventHandler`] trait object for event synthesis.  It holds no state
//! between calls apart from its configuration; each dispatch borrows the
//! display connection for its own duration only.
//!
//! Actions can also be read from a TOML script:
//!
//! ```toml
//! [[actions]]
//! action = "text"
//! text = "Hello!"
//!
//! [[actions]]
//! action = "key"
//! slot = { mode = "keyboard", code = 0xFF0D }
//! press = "tap"
//!
//! [[actions]]
//! action = "relative_motion"
//! dx = 5
//! dy = -3
//! ```

use std::sync::Arc;

use padkey_core::InputActionSlot;
use serde::{Deserialize, Serialize};

use super::event_handler::{DisplayRef, EventHandler};

/// Whether a key or button goes down, up, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressKind {
    Press,
    Release,
    /// Press immediately followed by release.
    #[default]
    Tap,
}

impl PressKind {
    /// The `pressed` flags to send, in order.
    fn phases(self) -> &'static [bool] {
        match self {
            PressKind::Press => &[true],
            PressKind::Release => &[false],
            PressKind::Tap => &[true, false],
        }
    }
}

/// One abstract input action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InputAction {
    Key {
        slot: InputActionSlot,
        #[serde(default)]
        press: PressKind,
    },
    MouseButton {
        slot: InputActionSlot,
        #[serde(default)]
        press: PressKind,
    },
    RelativeMotion {
        dx: i32,
        dy: i32,
    },
    /// `screen` falls back to the use case's default screen.
    AbsoluteMotion {
        x: i32,
        y: i32,
        #[serde(default)]
        screen: Option<i32>,
    },
    SpringMotion {
        dx: i32,
        dy: i32,
    },
    Text {
        text: String,
    },
}

/// An ordered list of actions, as stored in a script file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionScript {
    #[serde(default)]
    pub actions: Vec<InputAction>,
}

impl ActionScript {
    /// Parses a script from TOML.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is malformed or names an unknown action.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// The Dispatch Input use case.
pub struct DispatchInputUseCase {
    handler: Arc<dyn EventHandler>,
    default_screen: i32,
}

impl DispatchInputUseCase {
    /// Creates a use case delivering through `handler`; absolute motion
    /// without an explicit screen targets `default_screen`.
    pub fn new(handler: Arc<dyn EventHandler>, default_screen: i32) -> Self {
        Self {
            handler,
            default_screen,
        }
    }

    pub fn handler(&self) -> &Arc<dyn EventHandler> {
        &self.handler
    }

    /// Delivers one action.  Failures inside the handler are silent.
    pub fn dispatch(&self, display: DisplayRef<'_>, action: &InputAction) {
        match action {
            InputAction::Key { slot, press } => {
                for &pressed in press.phases() {
                    self.handler.send_keyboard_event(display, slot, pressed);
                }
            }
            InputAction::MouseButton { slot, press } => {
                for &pressed in press.phases() {
                    self.handler.send_mouse_button_event(display, slot, pressed);
                }
            }
            InputAction::RelativeMotion { dx, dy } => {
                self.handler.send_mouse_event(display, *dx, *dy);
            }
            InputAction::AbsoluteMotion { x, y, screen } => {
                let screen = screen.unwrap_or(self.default_screen);
                self.handler.send_mouse_abs_event(display, *x, *y, screen);
            }
            InputAction::SpringMotion { dx, dy } => {
                self.handler.send_mouse_spring_event(display, *dx, *dy);
            }
            InputAction::Text { text } => {
                self.handler.send_text_entry_event(display, text);
            }
        }
    }

    /// Delivers every action in order.  One dropped action never stops the rest.
    pub fn dispatch_all(&self, display: DisplayRef<'_>, actions: &[InputAction]) {
        for action in actions {
            self.dispatch(display, action);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // ── Recording handler ─────────────────────────────────────────────────────

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Key(InputActionSlot, bool),
        Button(InputActionSlot, bool),
        Rel(i32, i32),
        Abs(i32, i32, i32),
        Spring(i32, i32),
        Text(String),
    }

    #[derive(Default)]
    struct RecordingHandler {
        calls: Mutex<Vec<Call>>,
    }

    impl RecordingHandler {
        fn push(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl EventHandler for RecordingHandler {
        fn init(&self) -> bool {
            true
        }
        fn cleanup(&self) -> bool {
            true
        }
        fn send_keyboard_event(&self, _: DisplayRef<'_>, slot: &InputActionSlot, pressed: bool) {
            self.push(Call::Key(*slot, pressed));
        }
        fn send_mouse_button_event(&self, _: DisplayRef<'_>, slot: &InputActionSlot, pressed: bool) {
            self.push(Call::Button(*slot, pressed));
        }
        fn send_mouse_event(&self, _: DisplayRef<'_>, dx: i32, dy: i32) {
            self.push(Call::Rel(dx, dy));
        }
        fn send_mouse_abs_event(&self, _: DisplayRef<'_>, x: i32, y: i32, screen: i32) {
            self.push(Call::Abs(x, y, screen));
        }
        fn send_mouse_spring_event(&self, _: DisplayRef<'_>, dx: i32, dy: i32) {
            self.push(Call::Spring(dx, dy));
        }
        fn send_mouse_spring_event_sized(&self, _: DisplayRef<'_>, dx: i32, dy: i32, _: i32, _: i32) {
            self.push(Call::Spring(dx, dy));
        }
        fn send_text_entry_event(&self, _: DisplayRef<'_>, text: &str) {
            self.push(Call::Text(text.to_string()));
        }
        fn name(&self) -> &'static str {
            "Recording"
        }
        fn identifier(&self) -> &'static str {
            "recording"
        }
    }

    fn make_use_case() -> (DispatchInputUseCase, Arc<RecordingHandler>) {
        let handler = Arc::new(RecordingHandler::default());
        let uc = DispatchInputUseCase::new(Arc::clone(&handler) as Arc<dyn EventHandler>, -1);
        (uc, handler)
    }

    // ── Keys and buttons ──────────────────────────────────────────────────────

    #[test]
    fn test_key_tap_sends_press_then_release() {
        // Arrange
        let (uc, h) = make_use_case();
        let slot = InputActionSlot::keyboard(0xFF0D);

        // Act
        uc.dispatch(None, &InputAction::Key { slot, press: PressKind::Tap });

        // Assert
        assert_eq!(
            *h.calls.lock().unwrap(),
            vec![Call::Key(slot, true), Call::Key(slot, false)]
        );
    }

    #[test]
    fn test_key_release_sends_only_release() {
        let (uc, h) = make_use_case();
        let slot = InputActionSlot::keyboard(0xFFE1);

        uc.dispatch(None, &InputAction::Key { slot, press: PressKind::Release });

        assert_eq!(*h.calls.lock().unwrap(), vec![Call::Key(slot, false)]);
    }

    #[test]
    fn test_mouse_button_press_routes_to_button_handler() {
        let (uc, h) = make_use_case();
        let slot = InputActionSlot::mouse_button(3);

        uc.dispatch(None, &InputAction::MouseButton { slot, press: PressKind::Press });

        assert_eq!(*h.calls.lock().unwrap(), vec![Call::Button(slot, true)]);
    }

    // ── Motion ────────────────────────────────────────────────────────────────

    #[test]
    fn test_absolute_motion_without_screen_uses_default() {
        let (uc, h) = make_use_case();

        uc.dispatch(None, &InputAction::AbsoluteMotion { x: 10, y: 20, screen: None });

        assert_eq!(*h.calls.lock().unwrap(), vec![Call::Abs(10, 20, -1)]);
    }

    #[test]
    fn test_absolute_motion_with_screen_overrides_default() {
        let (uc, h) = make_use_case();

        uc.dispatch(None, &InputAction::AbsoluteMotion { x: 10, y: 20, screen: Some(1) });

        assert_eq!(*h.calls.lock().unwrap(), vec![Call::Abs(10, 20, 1)]);
    }

    #[test]
    fn test_dispatch_all_preserves_order() {
        let (uc, h) = make_use_case();
        let actions = vec![
            InputAction::RelativeMotion { dx: 5, dy: -3 },
            InputAction::Text { text: "hi".to_string() },
            InputAction::SpringMotion { dx: 1, dy: 2 },
        ];

        uc.dispatch_all(None, &actions);

        assert_eq!(
            *h.calls.lock().unwrap(),
            vec![
                Call::Rel(5, -3),
                Call::Text("hi".to_string()),
                Call::Spring(1, 2)
            ]
        );
    }

    // ── Scripts ───────────────────────────────────────────────────────────────

    #[test]
    fn test_script_parses_every_action_kind() {
        let script = ActionScript::from_toml_str(
            r#"
            [[actions]]
            action = "key"
            slot = { mode = "keyboard", code = 0xFF0D }

            [[actions]]
            action = "mouse_button"
            slot = { mode = "mouse_button", code = 1 }
            press = "press"

            [[actions]]
            action = "relative_motion"
            dx = 5
            dy = -3

            [[actions]]
            action = "absolute_motion"
            x = 100
            y = 200

            [[actions]]
            action = "spring_motion"
            dx = 0
            dy = 0

            [[actions]]
            action = "text"
            text = "Ab"
            "#,
        )
        .expect("script must parse");

        assert_eq!(script.actions.len(), 6);
        assert_eq!(
            script.actions[0],
            InputAction::Key {
                slot: InputActionSlot::keyboard(0xFF0D),
                press: PressKind::Tap
            }
        );
        assert_eq!(
            script.actions[3],
            InputAction::AbsoluteMotion { x: 100, y: 200, screen: None }
        );
    }

    #[test]
    fn test_script_with_unknown_action_is_rejected() {
        let result = ActionScript::from_toml_str(
            r#"
            [[actions]]
            action = "teleport"
            "#,
        );

        assert!(result.is_err());
    }
}
