//! The unit of work carried by the dispatch queue

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};

/// A formatted message and its level, queued for delivery to every writer
///
/// Envelopes are created on the producing thread and never change after that.
/// Writers receive them by reference and must not hold on to them past the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    message: String,
    level: LogLevel,
    timestamp: DateTime<Utc>,
}

impl Envelope {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            timestamp: Utc::now(),
        }
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// When the producing call was made
    #[inline]
    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_accessors() {
        let before = Utc::now();
        let envelope = Envelope::new(LogLevel::Warn, "[W] disk at 91%");
        assert_eq!(envelope.message(), "[W] disk at 91%");
        assert_eq!(envelope.level(), LogLevel::Warn);
        assert!(*envelope.timestamp() >= before);
    }
}
