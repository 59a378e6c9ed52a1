//! Error types for the logger system
//!
//! Only construction-time operations return errors. Once a [`Logger`](super::Logger)
//! is running, writer failures stay inside the writer and emission never fails.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration document could not be parsed
    #[error("Failed to parse logger configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A writer kind was registered twice
    #[error("Writer '{name}' is already registered")]
    DuplicateWriter { name: String },

    /// A writer kind was registered without a factory
    #[error("Writer '{name}' was registered without a factory")]
    MissingFactory { name: String },
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn duplicate_writer(name: impl Into<String>) -> Self {
        LoggerError::DuplicateWriter { name: name.into() }
    }

    pub fn missing_factory(name: impl Into<String>) -> Self {
        LoggerError::MissingFactory { name: name.into() }
    }

    /// Whether this error belongs to start-up wiring (registration or configuration)
    ///
    /// The composition root is expected to abort when it sees one of these.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            LoggerError::ConfigParse(_)
                | LoggerError::InvalidConfiguration { .. }
                | LoggerError::DuplicateWriter { .. }
                | LoggerError::MissingFactory { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("queue_capacity", "must be at least 1");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::duplicate_writer("console");
        assert!(matches!(err, LoggerError::DuplicateWriter { .. }));

        let err = LoggerError::missing_factory("file");
        assert!(matches!(err, LoggerError::MissingFactory { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::duplicate_writer("console");
        assert_eq!(err.to_string(), "Writer 'console' is already registered");

        let err = LoggerError::missing_factory("file");
        assert_eq!(
            err.to_string(),
            "Writer 'file' was registered without a factory"
        );

        let err = LoggerError::config("queue_capacity", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for queue_capacity: must be at least 1"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("reading config", "cannot open logger.toml", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("reading config"));
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn test_configuration_errors_are_flagged() {
        assert!(LoggerError::duplicate_writer("x").is_configuration_error());
        assert!(LoggerError::missing_factory("x").is_configuration_error());
        assert!(LoggerError::config("a", "b").is_configuration_error());
    }
}
