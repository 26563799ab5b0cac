//! padkey command-line entry point.
//!
//! Loads the configuration, selects a backend from the registry, opens the
//! X display, and dispatches the requested action(s).
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()               -- TOML file, defaults when absent
//!  └─ init_logging()              -- RUST_LOG, else [logging] log_level
//!  └─ BackendRegistry::get()      -- --backend / [backend] identifier
//!  └─ Command::into_actions()     -- CLI args or script file -> InputAction
//!  └─ DispatchInputUseCase
//!       ├─ --dry-run  -> RecordingDisplay, event log printed to stdout
//!       └─ otherwise  -> X11Display (Linux only)
//! ```
//!
//! # Silent failures (for beginners)
//!
//! `padkey key 0x1234` on a layout that has no such key exits with status 0
//! and does nothing.  That is the contract of the event handler: an action
//! that cannot be delivered is skipped, not reported as an error.  Run with
//! `RUST_LOG=debug` to see why an action was skipped.  Only problems with the
//! environment itself (bad config file, unknown backend, unreachable display)
//! make the command fail.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use padkey_core::{parse_keysym, InputActionSlot, KeySym};
use padkey_xtest::application::dispatch::{
    ActionScript, DispatchInputUseCase, InputAction, PressKind,
};
use padkey_xtest::application::registry::BackendRegistry;
use padkey_xtest::infrastructure::config::{default_config_path, load_config, PadkeyConfig};
use padkey_xtest::infrastructure::display::recording::RecordingDisplay;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Synthetic keyboard and mouse input for X11.
#[derive(Debug, Parser)]
#[command(
    name = "padkey",
    about = "Inject synthetic keyboard and mouse input through XTest",
    version
)]
struct Cli {
    /// Path to the config file.  Defaults to `$XDG_CONFIG_HOME/padkey/config.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// X display to connect to, e.g. `:0`.  Overrides `[backend] display`.
    #[arg(long, global = true, env = "PADKEY_DISPLAY")]
    display: Option<String>,

    /// Backend identifier.  Overrides `[backend] identifier`.
    #[arg(long, global = true, env = "PADKEY_BACKEND")]
    backend: Option<String>,

    /// Record events in memory and print them instead of touching the X server.
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Type a string.
    Type { text: String },

    /// Press and/or release one key.
    Key {
        /// KeySym as decimal, `0x` hex, a single character, or a name like `Return`.
        #[arg(value_parser = parse_keysym)]
        keysym: KeySym,
        #[arg(long, value_enum, default_value_t = ActionArg::Tap)]
        action: ActionArg,
    },

    /// Press and/or release one mouse button (1 = left, 2 = middle, 3 = right).
    Button {
        index: u32,
        #[arg(long, value_enum, default_value_t = ActionArg::Tap)]
        action: ActionArg,
    },

    /// Move the pointer by an offset.
    #[command(allow_negative_numbers = true)]
    MoveRel { dx: i32, dy: i32 },

    /// Move the pointer to a position.
    MoveAbs {
        x: i32,
        y: i32,
        /// Screen number; defaults to `[motion] screen`.
        #[arg(long, allow_negative_numbers = true)]
        screen: Option<i32>,
    },

    /// Run every action in a TOML script file, in order.
    Script { path: PathBuf },

    /// List registered backends.
    Backends,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ActionArg {
    Press,
    Release,
    Tap,
}

impl From<ActionArg> for PressKind {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Press => PressKind::Press,
            ActionArg::Release => PressKind::Release,
            ActionArg::Tap => PressKind::Tap,
        }
    }
}

impl Command {
    /// Converts the subcommand into the actions to dispatch.
    ///
    /// # Errors
    ///
    /// Returns an error if a script file cannot be read or parsed.
    fn into_actions(self) -> anyhow::Result<Vec<InputAction>> {
        let action = match self {
            Command::Type { text } => InputAction::Text { text },
            Command::Key { keysym, action } => InputAction::Key {
                slot: InputActionSlot::keyboard(keysym),
                press: action.into(),
            },
            Command::Button { index, action } => InputAction::MouseButton {
                slot: InputActionSlot::mouse_button(index),
                press: action.into(),
            },
            Command::MoveRel { dx, dy } => InputAction::RelativeMotion { dx, dy },
            Command::MoveAbs { x, y, screen } => InputAction::AbsoluteMotion { x, y, screen },
            Command::Script { path } => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read script {}", path.display()))?;
                let script = ActionScript::from_toml_str(&text)
                    .with_context(|| format!("failed to parse script {}", path.display()))?;
                return Ok(script.actions);
            }
            Command::Backends => return Ok(Vec::new()),
        };
        Ok(vec![action])
    }
}

// ── Startup helpers ───────────────────────────────────────────────────────────

/// Initialises `tracing` on stderr.  `RUST_LOG` wins over the configured level.
fn init_logging(configured_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the config named on the command line, or the default one.
///
/// A missing platform config directory is not fatal when no explicit path was
/// given: defaults are used and a warning is returned for logging later.
fn resolve_config(explicit: Option<PathBuf>) -> anyhow::Result<(PadkeyConfig, Option<String>)> {
    let path = match explicit {
        Some(path) => path,
        None => match default_config_path() {
            Ok(path) => path,
            Err(e) => return Ok((PadkeyConfig::default(), Some(e.to_string()))),
        },
    };

    let config = load_config(&path)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    Ok((config, None))
}

#[cfg(target_os = "linux")]
fn run_live(
    use_case: &DispatchInputUseCase,
    display_name: Option<&str>,
    actions: &[InputAction],
) -> anyhow::Result<()> {
    use padkey_xtest::infrastructure::display::linux::X11Display;

    let display = X11Display::open(display_name).context("could not open X display")?;
    use_case.dispatch_all(Some(&display), actions);
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn run_live(
    _use_case: &DispatchInputUseCase,
    _display_name: Option<&str>,
    _actions: &[InputAction],
) -> anyhow::Result<()> {
    anyhow::bail!("the XTest backend needs an X11 session on Linux; try --dry-run")
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_warning) = resolve_config(cli.config)?;
    init_logging(&config.logging.log_level);
    if let Some(reason) = config_warning {
        warn!("using default configuration: {reason}");
    }

    let registry = BackendRegistry::with_builtin();

    if let Command::Backends = cli.command {
        for (identifier, name) in registry.backends() {
            println!("{identifier:<10}{name}");
        }
        return Ok(());
    }

    let backend_id = cli.backend.unwrap_or_else(|| config.backend.identifier.clone());
    let handler = registry
        .get(&backend_id)
        .with_context(|| format!("backend '{backend_id}' is not available"))?;
    let actions = cli.command.into_actions()?;

    info!(
        backend = handler.identifier(),
        actions = actions.len(),
        dry_run = cli.dry_run,
        "padkey starting"
    );

    if !handler.init() {
        anyhow::bail!("backend '{}' failed to initialise", handler.identifier());
    }

    let use_case = DispatchInputUseCase::new(handler, config.motion.screen);
    let outcome = if cli.dry_run {
        let recorder = RecordingDisplay::us_qwerty();
        use_case.dispatch_all(Some(&recorder), &actions);
        for event in recorder.events() {
            println!("{event}");
        }
        Ok(())
    } else {
        let display_name = cli.display.or(config.backend.display);
        run_live(&use_case, display_name.as_deref(), &actions)
    };

    let handler = use_case.handler();
    if !handler.cleanup() {
        warn!(backend = handler.identifier(), "backend cleanup reported failure");
    }
    handler.print_post_messages();

    outcome
}

// ── Tests ─────────────────────────────────────────────────────────────────────
