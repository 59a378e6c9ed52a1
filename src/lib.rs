//! # Fanout Logger
//!
//! Asynchronous, level-filtered logging. Calls are filtered against a bitmask
//! of enabled levels, formatted on the calling thread, and queued on a bounded
//! channel. A single dispatch thread per [`Logger`] hands each message to
//! every active writer, in the order it was queued.
//!
//! ## Features
//!
//! - **Bounded queue with backpressure**: producers wait when the queue is full
//! - **Pluggable writers**: anything implementing [`LogWriter`], registered by name
//! - **Cheap disabled levels**: a masked-out call neither formats nor allocates
//! - **Caller annotation**: optional `[file.rs:42]` prefix on every message
//!
//! ## Wiring
//!
//! ```
//! use fanout_logger::prelude::*;
//! use fanout_logger::{info, warn};
//!
//! let config = LoggerConfig::from_toml_str(r#"
//!     [logger]
//!     queue_capacity = 32
//!     level_mask = ["info", "warn", "error", "critical"]
//!     writers = ["console"]
//! "#)?;
//!
//! let mut registry = WriterRegistry::new();
//! fanout_logger::writers::register_builtin_writers(&mut registry, &config)?;
//!
//! let logger = Logger::new(config, &registry)?;
//! info!(logger, "cache warmed with {} entries", 1024);
//! warn!(logger, "slow query took {}ms", 870);
//! logger.close();
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod macros;
pub mod writers;

pub mod prelude {
    pub use crate::core::{
        Envelope, LevelMask, LogLevel, LogWriter, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerMetrics, Result, WriterRegistry,
    };
    pub use crate::writers::ConsoleWriter;
    #[cfg(feature = "file")]
    pub use crate::writers::FileWriter;
}

pub use crate::core::{
    enabled, CallerLocation, Envelope, LevelMask, LogLevel, LogWriter, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, LoggerMetrics, Result, TimestampFormat, WriterFactory,
    WriterRegistry, DEFAULT_CALLER_DEPTH, DEFAULT_QUEUE_CAPACITY,
};
pub use crate::writers::{register_builtin_writers, ConsoleWriter};
#[cfg(feature = "file")]
pub use crate::writers::FileWriter;
