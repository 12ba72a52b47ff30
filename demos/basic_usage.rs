//! Basic logger usage example
//!
//! Demonstrates named loggers, level gating, field maps and custom levels.
//!
//! Run with: cargo run --example basic_usage

use fancy_logger::prelude::*;
use fancy_logger::{fields, info};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Fancy Logger - Basic Usage Example ===\n");

    let mut config = LoggerConfig::default();
    config.apply_env()?;

    // Loggers built from the same registry share column widths
    let app = Logger::builder()
        .config(config.clone())
        .name("app")
        .output(Arc::new(ConsoleSink::stdout()))
        .error_output(Arc::new(ConsoleSink::stderr()))
        .build();
    let db = Logger::builder()
        .config(config)
        .name("database")
        .output(Arc::new(ConsoleSink::stdout()))
        .error_output(Arc::new(ConsoleSink::stderr()))
        .build();

    println!("1. Logging at different levels:");
    app.info("This is an info message");
    app.warn("This is a warning message");
    app.error("This is an error message");
    db.info("Names are padded to the widest logger");

    println!("\n2. Debug and trace output:");
    app.debug("Hidden until debug is enabled");
    app.set_debug(true).set_trace(true);
    app.debug("Now visible, with a call site");
    app.trace("Trace output");

    println!("\n3. Formatted messages:");
    let port = 8080;
    info!(app, "Listening on port {}", port);

    println!("\n4. Field maps:");
    db.info_map(&fields! {
        "query" => "SELECT 1",
        "rows" => 1,
        "elapsed_ms" => 0.42,
        "pool" => fields! { "idle" => 3, "busy" => 1 },
    });

    println!("\n5. Custom levels:");
    let audit = app.registry().register_level(Level::new("AUDIT"));
    app.log(&audit, "user 42 signed in");
    app.log_with_color(&audit, &Color::BLUE, "user 42 signed out");

    println!("\n6. Runtime toggles:");
    app.set_color(false).info("Plain text");
    app.set_timestamp(false).info("No timestamp");
    app.set_quiet(true).info("Never printed");

    println!("\nMetrics: {:?}", app.metrics());
    app.flush()?;
    db.flush()?;
    Ok(())
}
