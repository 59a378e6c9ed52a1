//! Basic logger usage example
//!
//! Demonstrates the console writer, level masks and caller annotation.
//!
//! Run with: cargo run --example basic_usage

use fanout_logger::prelude::*;
use fanout_logger::{critical, debug, error, info, trace, warn};

fn main() -> Result<()> {
    println!("=== Fanout Logger - Basic Usage Example ===\n");

    let mut registry = WriterRegistry::new();
    registry.register("console", || {
        Box::new(ConsoleWriter::new().with_colors(true))
    })?;

    // Every level enabled, caller annotation on
    let logger = Logger::builder().writers(["console"]).build(&registry)?;

    println!("1. Logging at every level:");
    trace!(logger, "This is a trace message");
    debug!(logger, "This is a debug message");
    info!(logger, "This is an info message");
    warn!(logger, "This is a warning message");
    error!(logger, "This is an error message");
    critical!(logger, "This is a critical message");
    logger.close();

    println!("\n2. Only warnings and above, without caller annotation:");
    let logger = Logger::builder()
        .level_mask(LogLevel::Warn | LogLevel::Error | LogLevel::Critical)
        .annotate_caller(false)
        .writers(["console"])
        .build(&registry)?;

    debug!(logger, "Debug message (hidden)");
    info!(logger, "Info message (hidden)");
    warn!(logger, "Disk usage at {}%", 91);
    error!(logger, "Failed to open {}", "settings.toml");
    logger.close();

    println!("\n3. Metrics:");
    let metrics = logger.metrics();
    println!(
        "   enqueued={} delivered={} blocked={}",
        metrics.enqueued(),
        metrics.delivered(),
        metrics.blocked_enqueues()
    );

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
