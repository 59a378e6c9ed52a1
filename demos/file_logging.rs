//! File logging example
//!
//! Demonstrates fanning out to the console and a file at the same time.
//!
//! Run with: cargo run --example file_logging

use fanout_logger::prelude::*;
use fanout_logger::{debug, error, info, register_builtin_writers, warn};

fn main() -> Result<()> {
    println!("=== Fanout Logger - File Logging Example ===\n");

    let config = LoggerConfig {
        writers: vec!["console".into(), "file".into()],
        file_path: Some("application.log".into()),
        ..LoggerConfig::default()
    };

    let mut registry = WriterRegistry::new();
    register_builtin_writers(&mut registry, &config)?;
    let logger = Logger::new(config, &registry)?;

    println!("1. Logging to both console and file:");
    info!(logger, "Application started");
    debug!(logger, "Loading configuration...");
    warn!(logger, "Using default settings for some options");
    info!(logger, "Connecting to database...");
    error!(logger, "Failed to load optional plugin");
    info!(logger, "Application initialization complete");

    // Delivers everything still queued and closes the file
    logger.close();

    println!("\n2. Log file contents:");
    let content = std::fs::read_to_string("application.log").map_err(|e| {
        LoggerError::io_operation("reading log file", "cannot read 'application.log'", e)
    })?;
    for line in content.lines() {
        println!("   {}", line);
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
