//! Linux X11 display connection with XTest event synthesis.
//!
//! Uses `XTestFakeKeyEvent`, `XTestFakeButtonEvent`,
//! `XTestFakeRelativeMotionEvent`, and `XTestFakeMotionEvent` to inject input
//! into the X11 session, and `XKeysymToKeycode` to resolve KeySyms.
//!
//! # What is XTest? (for beginners)
//!
//! XTest is an X11 protocol extension that lets a process synthesize keyboard
//! and mouse events as if the user had physically interacted with the hardware.
//! These events are delivered to the currently focused window exactly like real
//! input; the receiving application cannot distinguish them from physical input.
//!
//! Xlib buffers requests in the client.  Nothing reaches the server until the
//! buffer fills or `XFlush` is called, which is why every padkey operation ends
//! with a flush.
//!
//! # Ownership
//!
//! `X11Display` owns the `Display*` it opened and closes it on drop.  The
//! process opens one at start-up and lends it to the event handler for every
//! call; handlers never open or close displays themselves.
//!
//! # Permissions
//!
//! XTest requires the process to have access to the X display.  This is
//! normally satisfied when the process runs in the same user session.  If the
//! `DISPLAY` environment variable is not set or the X server is not accessible,
//! [`X11Display::open`] fails with a `Platform` error.

use std::ffi::CString;
use std::os::raw::{c_int, c_uint, c_ulong};
use std::ptr::{self, NonNull};

use padkey_core::keymap::{KeyCode, KeySym};
use tracing::debug;
use x11::{xlib, xtest};

use crate::application::event_handler::{DisplayConnection, EmulationError};

// ── X11 constants ─────────────────────────────────────────────────────────────

/// Passing `CurrentTime` (0) as the delay means "deliver without delay".
const CURRENT_TIME: c_ulong = 0;

/// Owned connection to an X server.
pub struct X11Display {
    display: NonNull<xlib::Display>,
}

impl X11Display {
    /// Opens a connection to the X display named `name`, or to `$DISPLAY`
    /// when `name` is `None`, and checks that the XTest extension is present.
    ///
    /// # Errors
    ///
    /// Returns `EmulationError::Platform` if the name contains a NUL byte, the
    /// display cannot be opened, or the server lacks XTest.
    pub fn open(name: Option<&str>) -> Result<Self, EmulationError> {
        let c_name = name
            .map(CString::new)
            .transpose()
            .map_err(|e| EmulationError::Platform(format!("invalid display name: {e}")))?;

        // SAFETY: the name pointer is either null or a valid NUL-terminated
        // string that outlives the call.
        let raw = unsafe { xlib::XOpenDisplay(c_name.as_ref().map_or(ptr::null(), |n| n.as_ptr())) };

        let display = NonNull::new(raw).ok_or_else(|| {
            let target = name
                .map(str::to_string)
                .or_else(|| std::env::var("DISPLAY").ok())
                .unwrap_or_else(|| "<unset>".to_string());
            EmulationError::Platform(format!("XOpenDisplay failed; DISPLAY={target}"))
        })?;
        let this = Self { display };

        if !this.has_xtest() {
            return Err(EmulationError::Platform(
                "X server does not support the XTEST extension".to_string(),
            ));
        }

        debug!(display = name.unwrap_or("$DISPLAY"), "opened X11 display");
        Ok(this)
    }

    /// Returns `true` if the server supports the XTest extension.
    pub fn has_xtest(&self) -> bool {
        let (mut event_base, mut error_base, mut major, mut minor) = (0, 0, 0, 0);
        // SAFETY: `self.display` is a live connection; the out-pointers are
        // valid for the duration of the call.
        let present = unsafe {
            xtest::XTestQueryExtension(
                self.raw(),
                &mut event_base,
                &mut error_base,
                &mut major,
                &mut minor,
            )
        };
        present != 0
    }

    fn raw(&self) -> *mut xlib::Display {
        self.display.as_ptr()
    }
}

/// Maps an XTest status (`True` on success) to a `Result`.
fn check_status(status: c_int, request: &str) -> Result<(), EmulationError> {
    if status == 0 {
        Err(EmulationError::Platform(format!("{request} failed")))
    } else {
        Ok(())
    }
}

impl DisplayConnection for X11Display {
    fn keysym_to_keycode(&self, keysym: KeySym) -> KeyCode {
        // SAFETY: `self.display` is a live connection.
        unsafe { xlib::XKeysymToKeycode(self.raw(), xlib::KeySym::from(keysym)) }
    }

    fn fake_key_event(&self, keycode: KeyCode, pressed: bool) -> Result<(), EmulationError> {
        // SAFETY: `self.display` is a live connection.
        let status = unsafe {
            xtest::XTestFakeKeyEvent(
                self.raw(),
                c_uint::from(keycode),
                c_int::from(pressed),
                CURRENT_TIME,
            )
        };
        check_status(status, "XTestFakeKeyEvent")
    }

    fn fake_button_event(&self, button: u32, pressed: bool) -> Result<(), EmulationError> {
        // SAFETY: `self.display` is a live connection.
        let status = unsafe {
            xtest::XTestFakeButtonEvent(self.raw(), button, c_int::from(pressed), CURRENT_TIME)
        };
        check_status(status, "XTestFakeButtonEvent")
    }

    fn fake_relative_motion_event(&self, dx: i32, dy: i32) -> Result<(), EmulationError> {
        // SAFETY: `self.display` is a live connection.
        // libXtst >= 1.2 takes a screen argument; -1 keeps the pointer's current screen.
        let status =
            unsafe { xtest::XTestFakeRelativeMotionEvent(self.raw(), -1, dx, dy, CURRENT_TIME) };
        check_status(status, "XTestFakeRelativeMotionEvent")
    }

    fn fake_motion_event(&self, screen: i32, x: i32, y: i32) -> Result<(), EmulationError> {
        // SAFETY: `self.display` is a live connection.
        let status = unsafe { xtest::XTestFakeMotionEvent(self.raw(), screen, x, y, CURRENT_TIME) };
        check_status(status, "XTestFakeMotionEvent")
    }

    fn flush(&self) -> Result<(), EmulationError> {
        // SAFETY: `self.display` is a live connection.
        unsafe { xlib::XFlush(self.raw()) };
        Ok(())
    }
}

impl Drop for X11Display {
    fn drop(&mut self) {
        // SAFETY: the display was opened by `open` and is not used after this.
        unsafe { xlib::XCloseDisplay(self.raw()) };
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
