//! Core logger types and traits

pub mod caller;
pub mod config;
pub mod envelope;
pub mod error;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod timestamp;
pub mod writer;

pub use caller::{CallerLocation, DEFAULT_CALLER_DEPTH};
pub use config::{LoggerConfig, DEFAULT_QUEUE_CAPACITY, DEFAULT_WRITER};
pub use envelope::Envelope;
pub use error::{LoggerError, Result};
pub use log_level::{enabled, LevelMask, LogLevel};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use registry::{WriterFactory, WriterRegistry};
pub use timestamp::TimestampFormat;
pub use writer::LogWriter;
