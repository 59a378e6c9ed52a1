//! Registry of writer kinds available to a logger
//!
//! The composition root builds one [`WriterRegistry`] during start-up,
//! registers every writer kind it knows about, and hands it to
//! [`Logger::new`](super::Logger::new). Registration is strict: an empty
//! name, a missing factory or a duplicate name is a configuration error.
//! Lookup is lenient: a logger asking for an unknown kind simply runs
//! without it.

use super::error::{LoggerError, Result};
use super::writer::LogWriter;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Constructs a fresh writer each time a logger activates this kind
pub type WriterFactory = Arc<dyn Fn() -> Box<dyn LogWriter> + Send + Sync>;

#[derive(Default, Clone)]
pub struct WriterRegistry {
    factories: HashMap<String, WriterFactory>,
}

impl WriterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a writer kind under `name`.
    ///
    /// # Example
    ///
    /// ```
    /// use fanout_logger::{Envelope, LogWriter, WriterRegistry};
    ///
    /// struct Discard;
    ///
    /// impl LogWriter for Discard {
    ///     fn write_msg(&mut self, _envelope: &Envelope) {}
    /// }
    ///
    /// let mut registry = WriterRegistry::new();
    /// registry.register("discard", || Box::new(Discard)).unwrap();
    /// assert!(registry.register("discard", || Box::new(Discard)).is_err());
    /// ```
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> Result<()>
    where
        F: Fn() -> Box<dyn LogWriter> + Send + Sync + 'static,
    {
        let factory: WriterFactory = Arc::new(factory);
        self.register_factory(name, Some(factory))
    }

    /// Register an already shared factory, which may be absent.
    ///
    /// Useful when factories come out of a table assembled elsewhere; an
    /// absent entry fails the same way a duplicate name does.
    pub fn register_factory(
        &mut self,
        name: impl Into<String>,
        factory: Option<WriterFactory>,
    ) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LoggerError::config("WriterRegistry", "writer name must not be empty"));
        }
        let factory = factory.ok_or_else(|| LoggerError::missing_factory(name.as_str()))?;
        if self.factories.contains_key(&name) {
            return Err(LoggerError::duplicate_writer(name));
        }
        self.factories.insert(name, factory);
        Ok(())
    }

    pub fn factory(&self, name: &str) -> Option<&WriterFactory> {
        self.factories.get(name)
    }

    /// Build a new writer of kind `name`, if registered
    pub fn create(&self, name: &str) -> Option<Box<dyn LogWriter>> {
        self.factory(name).map(|factory| factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for WriterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterRegistry")
            .field("writers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::envelope::Envelope;

    struct Discard;

    impl LogWriter for Discard {
        fn write_msg(&mut self, _envelope: &Envelope) {}
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = WriterRegistry::new();
        registry.register("discard", || Box::new(Discard)).unwrap();

        assert!(registry.contains("discard"));
        assert!(registry.create("discard").is_some());
        assert!(registry.create("missing").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut registry = WriterRegistry::new();
        registry.register("discard", || Box::new(Discard)).unwrap();

        let err = registry.register("discard", || Box::new(Discard)).unwrap_err();
        assert!(matches!(err, LoggerError::DuplicateWriter { ref name } if name == "discard"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_missing_factory_is_rejected() {
        let mut registry = WriterRegistry::new();
        let err = registry.register_factory("ghost", None).unwrap_err();
        assert!(matches!(err, LoggerError::MissingFactory { ref name } if name == "ghost"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut registry = WriterRegistry::new();
        let err = registry.register("  ", || Box::new(Discard)).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_names_are_sorted() {
        let mut registry = WriterRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.register(name, || Box::new(Discard)).unwrap();
        }
        assert_eq!(registry.names(), vec!["alpha", "mid", "zeta"]);
    }
}
