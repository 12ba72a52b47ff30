//! HTTP request logging example
//!
//! Demonstrates method labels colored by status class.
//!
//! Run with: cargo run --example http_logging

use fancy_logger::prelude::*;
use fancy_logger::fields;
use std::collections::HashMap;

fn main() -> Result<()> {
    println!("=== Fancy Logger - HTTP Logging Example ===\n");

    let http = HttpLogger::with_name_and_error("api", ConsoleSink::stdout(), ConsoleSink::stderr())
        .with_headers();
    let app = Logger::with_name_and_error("app", ConsoleSink::stdout(), ConsoleSink::stderr());

    app.info("Server started");

    let mut headers = HashMap::new();
    headers.insert("Accept".to_string(), vec!["application/json".to_string()]);
    headers.insert("Host".to_string(), vec!["example.com".to_string()]);

    http.get_method(fields! { "uri" => "/health", "latency_ms" => 1 }, 200);
    http.post_method(fields! { "uri" => "/users", "headers" => headers }, 201);
    http.put_method(fields! { "uri" => "/users/7" }, 304);
    http.delete_method(fields! { "uri" => "/users/8" }, 404);
    http.options_method(fields! { "uri" => "*" }, 204);
    http.patch_method(fields! { "uri" => "/users/7" }, 503);

    let method: HttpMethod = "head".parse()?;
    http.method(method, fields! { "uri" => "/" }, 200);

    app.info("Method labels widened the level column for every logger");
    http.flush()?;
    Ok(())
}
