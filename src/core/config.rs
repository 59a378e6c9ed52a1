//! Logger construction settings and their TOML representation
//!
//! Settings live under a `[logger]` table so they can share a file with the
//! rest of an application's configuration:
//!
//! ```toml
//! [logger]
//! queue_capacity = 64
//! level_mask = ["info", "warn", "error", "critical"]
//! annotate_caller = false
//! writers = ["console", "file"]
//! file_path = "/var/log/app.log"
//! ```

use super::caller::DEFAULT_CALLER_DEPTH;
use super::error::{LoggerError, Result};
use super::log_level::LevelMask;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_QUEUE_CAPACITY: usize = 16;
pub const DEFAULT_WRITER: &str = "console";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Envelopes buffered between producers and the dispatch thread
    pub queue_capacity: usize,
    pub level_mask: LevelMask,
    /// Prefix messages with `[file:line]` of the call site
    pub annotate_caller: bool,
    pub caller_depth: usize,
    /// Writer kinds to activate, in dispatch order
    pub writers: Vec<String>,
    /// Destination for the built-in `file` writer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            level_mask: LevelMask::ALL,
            annotate_caller: true,
            caller_depth: DEFAULT_CALLER_DEPTH,
            writers: vec![DEFAULT_WRITER.to_string()],
            file_path: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    logger: LoggerConfig,
}

impl LoggerConfig {
    /// Parse the `[logger]` table of a TOML document. A document without one
    /// yields the defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let document: ConfigDocument = toml::from_str(source)?;
        document.logger.validate()?;
        Ok(document.logger)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logger configuration",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(LoggerError::config("queue_capacity", "must be at least 1"));
        }
        Ok(())
    }
}
