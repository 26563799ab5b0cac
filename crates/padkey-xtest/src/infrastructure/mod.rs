//! Infrastructure layer for padkey-xtest.
//!
//! Contains OS-facing adapters: the X11 display connection and its in-memory
//! stand-in, and the TOML configuration file.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `padkey_core`, but MUST NOT be imported by the `application` layer outside
//! of tests.
//!
//! # Sub-modules
//!
//! - **`display`** – Implementations of `DisplayConnection`.  `X11Display`
//!   (Linux only) opens a real X server connection and injects events through
//!   XTest; `RecordingDisplay` records events in memory.
//!
//! - **`config`** – Loads and saves `PadkeyConfig` as TOML.

pub mod config;
pub mod display;
