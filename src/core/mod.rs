//! Core logger types and traits

pub mod buffer;
pub mod call_site;
pub mod color;
pub mod config;
pub mod error;
pub mod fields;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod render;
pub mod sink;
pub mod timestamp;

pub use buffer::{BufferPool, PooledBuffer, DEFAULT_POOL_CAPACITY};
pub use call_site::{CallSite, StackFrame};
pub use color::Color;
pub use config::{FieldRenderRules, LoggerConfig, NameFormat, NestedMode};
pub use error::{LoggerError, Result};
pub use fields::{FieldMap, FieldValue};
pub use level::{Level, Prefix};
pub use logger::{ExitHook, Logger, LoggerBuilder, Target, DEFAULT_EXIT_CODE};
pub use metrics::LoggerMetrics;
pub use registry::{ColumnWidths, Registry, RegistryBuilder};
pub use render::{KeyColors, RenderSnapshot};
pub use sink::Sink;
pub use timestamp::{TimeSource, TimestampFormat};
