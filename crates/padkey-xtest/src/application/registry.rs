//! Registry of interchangeable delivery backends.
//!
//! Backends are keyed by their [`EventHandler::identifier`].  The first
//! backend registered becomes the default unless another is chosen with
//! [`BackendRegistry::set_default`].

use std::sync::Arc;

use thiserror::Error;

use super::event_handler::EventHandler;
use super::xtest_handler::XTestEventHandler;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown input backend: {0}")]
    UnknownBackend(String),
}

/// Backends available to this process, in registration order.
#[derive(Default)]
pub struct BackendRegistry {
    backends: Vec<Arc<dyn EventHandler>>,
    default_identifier: Option<&'static str>,
}

impl BackendRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every backend compiled into this crate, with XTest
    /// as the default.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(XTestEventHandler::default()));
        registry
    }

    /// Adds `handler`, replacing any backend with the same identifier.
    pub fn register(&mut self, handler: Arc<dyn EventHandler>) {
        let id = handler.identifier();
        match self.backends.iter_mut().find(|b| b.identifier() == id) {
            Some(slot) => *slot = handler,
            None => self.backends.push(handler),
        }
        self.default_identifier.get_or_insert(id);
    }

    /// Makes `identifier` the default backend.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownBackend`] if nothing is registered
    /// under `identifier`.
    pub fn set_default(&mut self, identifier: &str) -> Result<(), RegistryError> {
        let handler = self.get(identifier)?;
        self.default_identifier = Some(handler.identifier());
        Ok(())
    }

    /// Looks up a backend by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownBackend`] if nothing is registered
    /// under `identifier`.
    pub fn get(&self, identifier: &str) -> Result<Arc<dyn EventHandler>, RegistryError> {
        self.backends
            .iter()
            .find(|b| b.identifier() == identifier)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownBackend(identifier.to_string()))
    }

    /// The default backend, if any backend is registered.
    pub fn default_backend(&self) -> Option<Arc<dyn EventHandler>> {
        self.default_identifier.and_then(|id| self.get(id).ok())
    }

    /// `(identifier, name)` of every backend, in registration order.
    pub fn backends(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.backends.iter().map(|b| (b.identifier(), b.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_defaults_to_xtest() {
        let registry = BackendRegistry::with_builtin();

        let backend = registry.default_backend().expect("default must exist");

        assert_eq!(backend.identifier(), "xtest");
        assert_eq!(backend.name(), "XTest");
    }

    #[test]
    fn test_get_unknown_backend_is_error() {
        let registry = BackendRegistry::with_builtin();

        assert_eq!(
            registry.get("uinput").err(),
            Some(RegistryError::UnknownBackend("uinput".to_string()))
        );
    }

    #[test]
    fn test_empty_registry_has_no_default() {
        assert!(BackendRegistry::new().default_backend().is_none());
    }

    #[test]
    fn test_reregistering_replaces_instead_of_duplicating() {
        let mut registry = BackendRegistry::with_builtin();

        registry.register(Arc::new(XTestEventHandler::default()));

        assert_eq!(registry.backends().collect::<Vec<_>>(), vec![("xtest", "XTest")]);
    }

    #[test]
    fn test_set_default_rejects_unknown_identifier() {
        let mut registry = BackendRegistry::with_builtin();

        assert!(registry.set_default("nope").is_err());
        assert!(registry.set_default("xtest").is_ok());
    }
}
