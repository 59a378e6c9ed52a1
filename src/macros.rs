//! Logging macros for ergonomic log message formatting.
//!
//! The macros test the logger's level mask before touching their arguments,
//! so a disabled call evaluates nothing and formats nothing.
//!
//! # Examples
//!
//! ```
//! use fanout_logger::prelude::*;
//! use fanout_logger::{debug, info};
//!
//! let logger = Logger::builder()
//!     .writers(Vec::<String>::new())
//!     .build(&WriterRegistry::new())
//!     .unwrap();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! debug!(logger, "config = {:?}", LoggerConfig::default());
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use fanout_logger::prelude::*;
/// # let logger = Logger::builder().writers(Vec::<String>::new()).build(&WriterRegistry::new()).unwrap();
/// use fanout_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level: $crate::LogLevel = $level;
        if logger.enabled(level) {
            logger.log(level, ::std::format_args!($($arg)+));
        }
    }};
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use fanout_logger::prelude::*;
/// # let logger = Logger::builder().writers(Vec::<String>::new()).build(&WriterRegistry::new()).unwrap();
/// use fanout_logger::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
///
/// # Examples
///
/// ```
/// # use fanout_logger::prelude::*;
/// # let logger = Logger::builder().writers(Vec::<String>::new()).build(&WriterRegistry::new()).unwrap();
/// use fanout_logger::critical;
/// critical!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Envelope, LogLevel, LogWriter, Logger, WriterRegistry};
    use parking_lot::Mutex;
    use std::cell::Cell;
    use std::fmt;
    use std::sync::Arc;

    struct Collect(Arc<Mutex<Vec<String>>>);

    impl LogWriter for Collect {
        fn write_msg(&mut self, envelope: &Envelope) {
            self.0.lock().push(envelope.message().to_string());
        }
    }

    fn collecting_logger(mask: impl Into<crate::LevelMask>) -> (Logger, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let mut registry = WriterRegistry::new();
        let sink = Arc::clone(&lines);
        registry
            .register("collect", move || Box::new(Collect(Arc::clone(&sink))))
            .unwrap();
        let logger = Logger::builder()
            .level_mask(mask)
            .annotate_caller(false)
            .writers(["collect"])
            .build(&registry)
            .unwrap();
        (logger, lines)
    }

    #[test]
    fn test_level_macros() {
        let (logger, lines) = collecting_logger(crate::LevelMask::ALL);
        trace!(logger, "t{}", 1);
        debug!(logger, "d{}", 2);
        info!(logger, "i{}", 3);
        warn!(logger, "w{}", 4);
        error!(logger, "e{}", 5);
        critical!(logger, "c{}", 6);
        log!(logger, LogLevel::Info, "plain");
        logger.close();

        assert_eq!(
            *lines.lock(),
            vec!["[T] t1", "[D] d2", "[I] i3", "[W] w4", "[E] e5", "[C] c6", "[I] plain"]
        );
    }

    #[test]
    fn test_disabled_macro_skips_argument_evaluation() {
        let (logger, lines) = collecting_logger(LogLevel::Error);
        let evaluated = Cell::new(0);
        let touch = || {
            evaluated.set(evaluated.get() + 1);
            "x"
        };

        debug!(logger, "{}", touch());
        assert_eq!(evaluated.get(), 0);

        error!(logger, "{}", touch());
        assert_eq!(evaluated.get(), 1);

        logger.close();
        assert_eq!(*lines.lock(), vec!["[E] x"]);
    }

    #[test]
    fn test_disabled_method_skips_formatting() {
        struct Loud<'a>(&'a Cell<u32>);

        impl fmt::Display for Loud<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.set(self.0.get() + 1);
                write!(f, "loud")
            }
        }

        let (logger, _lines) = collecting_logger(LogLevel::Warn);
        let formatted = Cell::new(0);

        logger.info(format_args!("{}", Loud(&formatted)));
        assert_eq!(formatted.get(), 0);

        logger.warn(format_args!("{}", Loud(&formatted)));
        assert_eq!(formatted.get(), 1);
    }
}
