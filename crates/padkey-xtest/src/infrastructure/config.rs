//! TOML-based configuration for the padkey binary.
//!
//! The default location is `$XDG_CONFIG_HOME/padkey/config.toml`, falling
//! back to `~/.config/padkey/config.toml`.  A different file can be passed
//! with `--config`.
//!
//! ```toml
//! [backend]
//! identifier = "xtest"
//! display = ":0"
//!
//! [logging]
//! log_level = "debug"
//!
//! [motion]
//! screen = -1
//! ```
//!
//! # Serde default values
//!
//! Every field carries a `#[serde(default ...)]` so the binary works on first
//! run (before a config file exists) and with partial files that set only the
//! values the user cares about.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::xtest_handler::XTEST_IDENTIFIER;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PadkeyConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub motion: MotionConfig,
}

/// Which delivery backend to use and where it delivers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    /// Registry identifier of the backend, e.g. `"xtest"`.
    #[serde(default = "default_backend_identifier")]
    pub identifier: String,
    /// X display name.  Absent means "use `$DISPLAY`".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MotionConfig {
    /// Screen for absolute motion when none is given.  `-1` targets the
    /// screen that currently holds the pointer.
    #[serde(default = "default_screen")]
    pub screen: i32,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_backend_identifier() -> String {
    XTEST_IDENTIFIER.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_screen() -> i32 {
    -1
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            identifier: default_backend_identifier(),
            display: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            screen: default_screen(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the default config file path.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when neither
/// `XDG_CONFIG_HOME` nor `HOME` is set.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok_or(ConfigError::NoPlatformConfigDir)?;
    Ok(base.join("padkey").join("config.toml"))
}

/// Loads `PadkeyConfig` from `path`, returning defaults if the file does not
/// exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<PadkeyConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PadkeyConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `config` to `path` as pretty TOML, creating parent directories.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(path: &Path, config: &PadkeyConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_selects_xtest_on_pointer_screen() {
        let cfg = PadkeyConfig::default();

        assert_eq!(cfg.backend.identifier, "xtest");
        assert_eq!(cfg.backend.display, None);
        assert_eq!(cfg.logging.log_level, "info");
        assert_eq!(cfg.motion.screen, -1);
    }

    #[test]
    fn test_deserialize_empty_toml_uses_defaults() {
        let cfg: PadkeyConfig = toml::from_str("").expect("empty TOML must parse");

        assert_eq!(cfg, PadkeyConfig::default());
    }

    #[test]
    fn test_deserialize_partial_backend_overrides_defaults() {
        let toml_str = r#"
            [backend]
            display = ":1"
        "#;

        let cfg: PadkeyConfig = toml::from_str(toml_str).expect("partial TOML must parse");

        assert_eq!(cfg.backend.identifier, "xtest");
        assert_eq!(cfg.backend.display.as_deref(), Some(":1"));
        assert_eq!(cfg.logging, LoggingConfig::default());
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = TempDir::new().unwrap();

        let cfg = load_config(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(cfg, PadkeyConfig::default());
    }

    #[test]
    fn test_save_then_load_preserves_values() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = PadkeyConfig::default();
        cfg.backend.display = Some(":2".to_string());
        cfg.logging.log_level = "trace".to_string();
        cfg.motion.screen = 0;

        // Act
        save_config(&path, &cfg).unwrap();
        let loaded = load_config(&path).unwrap();

        // Assert
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_load_malformed_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[backend\nidentifier = ").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));
    }
}
