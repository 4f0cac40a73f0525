use std::sync::Arc;

use anyhow::{Context, Result};

use pretty_logger::logging::{self, LoggerRegistry};

fn main() -> Result<()> {
    let registry = LoggerRegistry::new();
    let logger = registry.get_default()?;

    println!("=== Testing all log levels ===\n");

    logger.debug("This is a DEBUG message (Cyan).");
    logger.info("This is an INFO message (Green).");
    logger.warning("This is a WARNING message (Yellow).");
    logger.error("This is an ERROR message (Red).");
    logger.critical("This is a CRITICAL message (Bold Magenta).");

    println!("\n=== Testing exception logging ===\n");

    let parsed = "1/0"
        .parse::<u32>()
        .context("Failed to parse divisor");
    if let Err(e) = parsed {
        logger.exception("An exception occurred!", &*e);
    }

    println!("\n=== Testing tracing events ===\n");

    logging::init_tracing(Arc::clone(&logger))?;
    tracing::info!(source = "tracing", "Events from tracing macros share the same sinks.");

    println!("\nLogs saved to: {}", logger.file_path().display());

    registry.shutdown();
    Ok(())
}
