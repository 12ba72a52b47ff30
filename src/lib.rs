//! # Fancy Logger
//!
//! A leveled, colorized console logger that renders human-readable lines with
//! aligned columns.
//!
//! ```text
//! <db>      [INFO]  2025-01-08T10:30:45Z connected
//! <service> [ERROR] 2025-01-08T10:30:46Z upstream timed out
//!     at src/main.rs:42:9
//! ```
//!
//! ## Features
//!
//! - **Aligned output**: logger names and level labels share column widths
//!   through a [`Registry`], so lines from many loggers line up
//! - **Colors**: ANSI escapes, detected from the output sink and switchable at
//!   runtime
//! - **Field maps**: key-sorted `key=value` rendering with nested groups
//! - **Call sites**: FATAL, ERROR and DEBUG lines record where they were logged
//! - **Thread safe**: every logger may be shared and reconfigured across threads
//!
//! ## Example
//!
//! ```
//! use fancy_logger::prelude::*;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::with_name("svc", sink.clone());
//! logger.set_color(false).set_timestamp(false);
//!
//! logger.info("started");
//! assert_eq!(sink.contents_string(), "<svc> [INFO]  started\n");
//! ```

pub mod core;
pub mod http;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Color, FieldMap, FieldRenderRules, FieldValue, Level, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerMetrics, NameFormat, NestedMode, Prefix, Registry, Result, Sink,
        TimeSource, TimestampFormat,
    };
    pub use crate::http::{HttpLogger, HttpMethod};
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink, WriterSink};
}

pub use crate::core::{
    BufferPool, CallSite, Color, ColumnWidths, ExitHook, FieldMap, FieldRenderRules, FieldValue,
    KeyColors, Level, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    NameFormat, NestedMode, Prefix, Registry, RegistryBuilder, Result, Sink, StackFrame, Target,
    TimeSource, TimestampFormat, DEFAULT_EXIT_CODE,
};
pub use http::{HttpLogger, HttpMethod};
pub use sinks::{ConsoleSink, FileSink, MemorySink, WriterSink};
