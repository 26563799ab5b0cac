//! Display connections that carry synthesized events to the input subsystem.
//!
//! The live implementation is selected at compile time via `#[cfg(target_os = ...)]`.
//! [`recording::RecordingDisplay`] is always compiled so tests and `--dry-run`
//! work on any platform without a display server.

pub mod recording;

#[cfg(target_os = "linux")]
pub mod linux;
