//! Request logging with HTTP methods as levels
//!
//! [`HttpLogger`] wraps a [`Logger`] and adds one call per HTTP method. Each
//! request becomes a field-map line whose label is the method, painted by the
//! status class, with the `status` entry always present:
//!
//! ```text
//! {api} [GET]     method=GET status=200 uri=/health
//! ```
//!
//! Method labels join the registry's level column, so `OPTIONS` and `CONNECT`
//! widen the padding of every logger sharing that registry.

use crate::core::color::Color;
use crate::core::{
    FieldMap, Level, Logger, LoggerBuilder, LoggerError, NameFormat, Prefix, Registry, Sink,
};
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

/// Key injected into every request line
pub const STATUS_KEY: &str = "status";

/// Key removed from request lines unless headers are enabled
pub const HEADERS_KEY: &str = "headers";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Connect,
    Patch,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 9] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Connect,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }

    pub fn level(&self) -> Level {
        Level::new(self.as_str())
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| LoggerError::invalid_level(s))
    }
}

/// Label color for a status code; `None` outside 100-599
pub fn status_color(status: u16) -> Option<Color> {
    match status {
        100..=199 => Some(Color::CYAN),
        200..=299 => Some(Color::GREEN),
        300..=399 => Some(Color::ORANGE),
        400..=499 => Some(Color::RED),
        500..=599 => Some(Color::FATAL_RED),
        _ => None,
    }
}

/// Logger with one call per HTTP method
///
/// Dereferences to the wrapped [`Logger`], so the level calls and runtime
/// toggles are available as well.
///
/// # Example
///
/// ```
/// use fancy_logger::http::HttpLogger;
/// use fancy_logger::{fields, MemorySink};
///
/// let sink = MemorySink::new();
/// let http = HttpLogger::with_name("api", sink.clone());
/// http.set_color(false).set_timestamp(false);
///
/// http.get_method(fields! { "uri" => "/health" }, 200);
/// assert!(sink.contents_string().starts_with("{api} [GET]"));
/// ```
pub struct HttpLogger {
    logger: Logger,
    methods: HashMap<HttpMethod, Prefix>,
    debug_headers: bool,
    status_colors: HashMap<String, Color>,
}

impl HttpLogger {
    pub fn new<S: Sink + 'static>(out: S) -> Self {
        Self::from_builder(Logger::builder().output(Arc::new(out)))
    }

    pub fn with_error<O, E>(out: O, err: E) -> Self
    where
        O: Sink + 'static,
        E: Sink + 'static,
    {
        Self::from_builder(
            Logger::builder()
                .output(Arc::new(out))
                .error_output(Arc::new(err)),
        )
    }

    pub fn with_name<S: Sink + 'static>(name: impl Into<String>, out: S) -> Self {
        Self::from_builder(Logger::builder().name(name).output(Arc::new(out)))
    }

    pub fn with_name_and_error<O, E>(name: impl Into<String>, out: O, err: E) -> Self
    where
        O: Sink + 'static,
        E: Sink + 'static,
    {
        Self::from_builder(
            Logger::builder()
                .name(name)
                .output(Arc::new(out))
                .error_output(Arc::new(err)),
        )
    }

    /// Build from a configured [`LoggerBuilder`]
    ///
    /// The name format becomes `{name}` and trace output is enabled; both can
    /// be changed afterwards through the wrapped logger.
    pub fn from_builder(builder: LoggerBuilder) -> Self {
        let logger = builder.name_format(NameFormat::braces()).trace(true).build();
        let methods = register_methods(logger.registry());

        let mut status_colors = HashMap::new();
        status_colors.insert(STATUS_KEY.to_string(), Color::ORANGE);

        Self {
            logger,
            methods,
            debug_headers: false,
            status_colors,
        }
    }

    /// Keep the `headers` entry in request lines
    #[must_use = "builder methods return a new value"]
    pub fn with_headers(mut self) -> Self {
        self.debug_headers = true;
        self
    }

    pub fn debug_headers(&self) -> bool {
        self.debug_headers
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Log one request; `status` is written into `fields`
    pub fn method(&self, method: HttpMethod, mut fields: FieldMap, status: u16) {
        let Some(prefix) = self.methods.get(&method) else {
            return;
        };
        if !self.debug_headers {
            fields.remove(HEADERS_KEY);
        }
        fields.add_field(STATUS_KEY, status);

        let label_color = status_color(status);
        self.logger.log_map_with_colors(
            prefix,
            &fields,
            label_color.as_ref(),
            Some(&self.status_colors),
        );
    }

    pub fn get_method(&self, fields: FieldMap, status: u16) {
        self.method(HttpMethod::Get, fields, status);
    }

    pub fn post_method(&self, fields: FieldMap, status: u16) {
        self.method(HttpMethod::Post, fields, status);
    }

    pub fn put_method(&self, fields: FieldMap, status: u16) {
        self.method(HttpMethod::Put, fields, status);
    }

    pub fn delete_method(&self, fields: FieldMap, status: u16) {
        self.method(HttpMethod::Delete, fields, status);
    }

    pub fn head_method(&self, fields: FieldMap, status: u16) {
        self.method(HttpMethod::Head, fields, status);
    }

    pub fn options_method(&self, fields: FieldMap, status: u16) {
        self.method(HttpMethod::Options, fields, status);
    }

    pub fn connect_method(&self, fields: FieldMap, status: u16) {
        self.method(HttpMethod::Connect, fields, status);
    }

    pub fn patch_method(&self, fields: FieldMap, status: u16) {
        self.method(HttpMethod::Patch, fields, status);
    }

    pub fn trace_method(&self, fields: FieldMap, status: u16) {
        self.method(HttpMethod::Trace, fields, status);
    }
}

/// Add method prefixes to `registry` and return the table used for requests
///
/// A level the registry already knows keeps its entry; in particular the
/// standard TRACE level is not replaced by the TRACE method.
fn register_methods(registry: &Registry) -> HashMap<HttpMethod, Prefix> {
    HttpMethod::ALL
        .into_iter()
        .map(|method| {
            let prefix = Prefix::new(method.level(), Color::CYAN);
            if registry.prefix(&prefix.level).is_none() {
                registry.register_prefix(prefix.clone());
            } else {
                registry.reserve_level_width(&prefix.level);
            }
            (method, prefix)
        })
        .collect()
}

impl Deref for HttpLogger {
    type Target = Logger;

    fn deref(&self) -> &Logger {
        &self.logger
    }
}

impl fmt::Debug for HttpLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpLogger")
            .field("logger", &self.logger)
            .field("debug_headers", &self.debug_headers)
            .finish()
    }
}
