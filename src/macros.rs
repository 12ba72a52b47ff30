//! Logging macros for ergonomic log message formatting.
//!
//! These macros forward `format_args!` to the logger's `*_fmt` methods, so
//! nothing is formatted when a level is disabled or the logger is quiet.
//! Call sites recorded for stack-trace levels point at the macro invocation.
//!
//! # Examples
//!
//! ```
//! use fancy_logger::prelude::*;
//! use fancy_logger::{fields, info};
//!
//! let sink = MemorySink::new();
//! let logger = Logger::with_name("app", sink.clone());
//! logger.set_color(false).set_timestamp(false);
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! logger.info_map(&fields! { "port" => port, "tls" => false });
//!
//! assert_eq!(sink.lines().len(), 2);
//! ```

/// Log a message with a custom prefix.
///
/// # Examples
///
/// ```
/// # use fancy_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new());
/// use fancy_logger::log;
/// let audit = Prefix::new(Level::new("AUDIT"), Color::BLUE);
/// log!(logger, audit, "Simple message");
/// log!(logger, audit, "User id: {}", 42);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $prefix:expr, $($arg:tt)+) => {
        $logger.log_fmt(&$prefix, format_args!($($arg)+))
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use fancy_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new());
/// # logger.set_trace(true);
/// use fancy_logger::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.trace_fmt(format_args!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use fancy_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new());
/// use fancy_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug_fmt(format_args!($($arg)+))
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use fancy_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new());
/// use fancy_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info_fmt(format_args!($($arg)+))
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use fancy_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new());
/// use fancy_logger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn_fmt(format_args!($($arg)+))
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use fancy_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new());
/// use fancy_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error_fmt(format_args!($($arg)+))
    };
}

/// Log a fatal-level message and exit the process.
///
/// # Examples
///
/// ```no_run
/// # use fancy_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new());
/// use fancy_logger::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal_fmt(format_args!($($arg)+))
    };
}

/// Build a [`FieldMap`](crate::FieldMap) from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use fancy_logger::fields;
///
/// let fields = fields! { "method" => "GET", "status" => 200 };
/// assert_eq!(fields.len(), 2);
/// assert!(fields! {}.is_empty());
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::FieldMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::FieldMap::new();
        $(map.add_field($key, $value);)+
        map
    }};
}
