//! Writer implementations

pub mod console;
#[cfg(feature = "file")]
pub mod file;

pub use console::ConsoleWriter;
#[cfg(feature = "file")]
pub use file::FileWriter;

// Re-export the trait for convenience
pub use crate::core::LogWriter;

use crate::core::{LoggerConfig, Result, WriterRegistry};

pub const CONSOLE: &str = "console";
pub const FILE: &str = "file";

/// Register the writers this crate ships with.
///
/// `"console"` is always registered. `"file"` is registered when
/// `config.file_path` is set and the `file` feature is enabled.
pub fn register_builtin_writers(registry: &mut WriterRegistry, config: &LoggerConfig) -> Result<()> {
    registry.register(CONSOLE, || Box::new(ConsoleWriter::new()))?;
    register_file_writer(registry, config)
}

#[cfg(feature = "file")]
fn register_file_writer(registry: &mut WriterRegistry, config: &LoggerConfig) -> Result<()> {
    if let Some(path) = config.file_path.clone() {
        registry.register(FILE, move || Box::new(FileWriter::new(path.clone())))?;
    }
    Ok(())
}

#[cfg(not(feature = "file"))]
fn register_file_writer(_registry: &mut WriterRegistry, _config: &LoggerConfig) -> Result<()> {
    Ok(())
}
