//! Configuration file example
//!
//! Loads logger settings from the `[logger]` table of a TOML file.
//!
//! Run with: cargo run --example config_file -- path/to/app.toml

use fanout_logger::prelude::*;
use fanout_logger::{debug, error, info, register_builtin_writers};

const SAMPLE: &str = r#"
[logger]
queue_capacity = 64
level_mask = ["info", "error", "critical"]
annotate_caller = true
caller_depth = 2
writers = ["console"]
"#;

fn main() -> Result<()> {
    println!("=== Fanout Logger - Config File Example ===\n");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            println!("Loading {}", path);
            LoggerConfig::load(path)?
        }
        None => {
            println!("No path given, using the built-in sample:{}", SAMPLE);
            LoggerConfig::from_toml_str(SAMPLE)?
        }
    };
    println!(
        "capacity={} mask={} writers={:?}\n",
        config.queue_capacity, config.level_mask, config.writers
    );

    let mut registry = WriterRegistry::new();
    register_builtin_writers(&mut registry, &config)?;
    let logger = Logger::new(config, &registry)?;

    info!(logger, "Configuration applied");
    debug!(logger, "Hidden unless the mask enables debug");
    error!(logger, "Errors always make it through this sample");
    logger.close();

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
