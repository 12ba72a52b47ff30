//! Main logger implementation

use super::{
    buffer::BufferPool,
    call_site::CallSite,
    color::Color,
    config::{FieldRenderRules, LoggerConfig, NameFormat},
    error::Result,
    fields::FieldMap,
    level::{Level, Prefix},
    metrics::LoggerMetrics,
    registry::Registry,
    render::{self, KeyColors, RenderSnapshot},
    sink::Sink,
    timestamp::{TimeSource, TimestampFormat},
};
use crate::sinks::ConsoleSink;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Exit status used by `fatal` and friends
pub const DEFAULT_EXIT_CODE: i32 = 1;

/// Action run after a fatal line; receives the exit status
pub type ExitHook = Arc<dyn Fn(i32) + Send + Sync>;

/// Which of the logger's two sinks a line goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Out,
    Err,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    Always,
    Debug,
    Trace,
}

struct LoggerState {
    name: String,
    name_format: Option<NameFormat>,
    color: bool,
    debug: bool,
    trace: bool,
    timestamp: bool,
    quiet: bool,
    timestamp_color: Option<Color>,
    time_source: TimeSource,
    field_rules: FieldRenderRules,
}

impl LoggerState {
    fn allows(&self, gate: Gate) -> bool {
        if self.quiet {
            return false;
        }
        match gate {
            Gate::Always => true,
            Gate::Debug => self.debug,
            Gate::Trace => self.trace,
        }
    }

    fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            name: self.name.clone(),
            name_format: self.name_format.clone(),
            color: self.color,
            timestamp: self.timestamp,
            timestamp_color: self.timestamp_color.clone(),
            time_source: self.time_source.clone(),
            field_rules: self.field_rules,
        }
    }
}

/// A leveled, colorized console logger
///
/// Configuration lives behind a mutex; each call snapshots it before
/// rendering, so toggles may be flipped from any thread while other threads
/// log. Setters return `&Self` for chaining.
///
/// # Example
///
/// ```
/// use fancy_logger::{FieldMap, Logger, MemorySink};
///
/// let sink = MemorySink::new();
/// let logger = Logger::with_name("api", sink.clone());
/// logger.set_color(false).set_timestamp(false);
///
/// logger.info("listening");
/// logger.info_map(&FieldMap::new().with_field("port", 8080));
///
/// assert_eq!(sink.lines().len(), 2);
/// ```
pub struct Logger {
    state: Mutex<LoggerState>,
    out: Arc<dyn Sink>,
    err: Arc<dyn Sink>,
    registry: Arc<Registry>,
    pool: Arc<BufferPool>,
    metrics: Arc<LoggerMetrics>,
    exit_hook: ExitHook,
}

impl Logger {
    /// Logger writing every level to `out`
    pub fn new<S: Sink + 'static>(out: S) -> Self {
        Self::builder().output(Arc::new(out)).build()
    }

    /// Logger writing ERROR and FATAL to `err`, everything else to `out`
    pub fn with_error<O, E>(out: O, err: E) -> Self
    where
        O: Sink + 'static,
        E: Sink + 'static,
    {
        Self::builder()
            .output(Arc::new(out))
            .error_output(Arc::new(err))
            .build()
    }

    pub fn with_name<S: Sink + 'static>(name: impl Into<String>, out: S) -> Self {
        Self::builder().name(name).output(Arc::new(out)).build()
    }

    pub fn with_name_and_error<O, E>(name: impl Into<String>, out: O, err: E) -> Self
    where
        O: Sink + 'static,
        E: Sink + 'static,
    {
        Self::builder()
            .name(name)
            .output(Arc::new(out))
            .error_output(Arc::new(err))
            .build()
    }

    /// Logger from a deserialized configuration
    pub fn from_config(config: LoggerConfig, out: Arc<dyn Sink>, err: Arc<dyn Sink>) -> Self {
        Self::builder()
            .config(config)
            .output(out)
            .error_output(err)
            .build()
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    // ---------------------------------------------------------------------
    // Runtime configuration
    // ---------------------------------------------------------------------

    pub fn set_color(&self, enabled: bool) -> &Self {
        self.state.lock().color = enabled;
        self
    }

    /// Reveal DEBUG output
    pub fn set_debug(&self, enabled: bool) -> &Self {
        self.state.lock().debug = enabled;
        self
    }

    /// Reveal TRACE output
    pub fn set_trace(&self, enabled: bool) -> &Self {
        self.state.lock().trace = enabled;
        self
    }

    pub fn set_timestamp(&self, enabled: bool) -> &Self {
        self.state.lock().timestamp = enabled;
        self
    }

    /// Suppress all output; FATAL calls still exit
    pub fn set_quiet(&self, enabled: bool) -> &Self {
        self.state.lock().quiet = enabled;
        self
    }

    /// Override the timestamp color; `None` restores blue
    pub fn set_timestamp_color(&self, color: Option<Color>) -> &Self {
        self.state.lock().timestamp_color = color;
        self
    }

    pub fn set_time_source(&self, source: TimeSource) -> &Self {
        self.state.lock().time_source = source;
        self
    }

    /// Rename the logger; the new name joins the shared name column
    pub fn set_name(&self, name: impl Into<String>) -> &Self {
        let name = name.into();
        self.registry.register_name(&name);
        self.state.lock().name = name;
        self
    }

    pub fn set_name_format(&self, format: Option<NameFormat>) -> &Self {
        self.state.lock().name_format = format;
        self
    }

    pub fn set_field_rules(&self, rules: FieldRenderRules) -> &Self {
        self.state.lock().field_rules = rules;
        self
    }

    pub fn is_color(&self) -> bool {
        self.state.lock().color
    }

    pub fn is_debug(&self) -> bool {
        self.state.lock().debug
    }

    pub fn is_trace(&self) -> bool {
        self.state.lock().trace
    }

    pub fn is_timestamp(&self) -> bool {
        self.state.lock().timestamp
    }

    pub fn is_quiet(&self) -> bool {
        self.state.lock().quiet
    }

    pub fn name(&self) -> String {
        self.state.lock().name.clone()
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn pool(&self) -> &Arc<BufferPool> {
        &self.pool
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.out.flush()?;
        self.err.flush()?;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Emission
    // ---------------------------------------------------------------------

    /// Snapshot the configuration if `gate` lets the call through
    fn admit(&self, gate: Gate) -> Option<RenderSnapshot> {
        let state = self.state.lock();
        if state.allows(gate) {
            Some(state.snapshot())
        } else {
            drop(state);
            self.metrics.record_suppressed();
            None
        }
    }

    #[track_caller]
    fn output(
        &self,
        gate: Gate,
        prefix: &Prefix,
        target: Target,
        color_override: Option<&Color>,
        message: &dyn fmt::Display,
    ) {
        let Some(snapshot) = self.admit(gate) else {
            return;
        };
        let call_site = if prefix.requires_stack_trace {
            Some(CallSite::capture())
        } else {
            None
        };
        let message = message.to_string();

        let mut buf = self.pool.acquire(snapshot.color);
        render::render_line(
            &mut buf,
            &snapshot,
            self.registry.widths(),
            prefix,
            color_override,
            &message,
            call_site.as_ref(),
        );
        self.dispatch(target, buf.bytes());
    }

    #[track_caller]
    fn output_map(
        &self,
        gate: Gate,
        prefix: &Prefix,
        target: Target,
        color_override: Option<&Color>,
        fields: &FieldMap,
        key_colors: Option<&KeyColors>,
    ) {
        let Some(snapshot) = self.admit(gate) else {
            return;
        };
        let call_site = if prefix.requires_stack_trace {
            Some(CallSite::capture())
        } else {
            None
        };

        let mut buf = self.pool.acquire(snapshot.color);
        render::render_fields(
            &mut buf,
            &snapshot,
            self.registry.widths(),
            prefix,
            color_override,
            fields,
            key_colors,
            call_site.as_ref(),
        );
        self.dispatch(target, buf.bytes());
    }

    fn dispatch(&self, target: Target, line: &[u8]) {
        let sink = match target {
            Target::Out => &self.out,
            Target::Err => &self.err,
        };
        // Sink failures never reach the caller.
        match sink.write(line) {
            Ok(()) => self.metrics.record_written(),
            Err(_) => self.metrics.record_write_failure(),
        };
    }

    fn standard(&self, level: &Level) -> Prefix {
        self.registry.standard_prefix(level)
    }

    fn exit(&self, code: i32) {
        let _ = self.flush();
        (self.exit_hook)(code);
    }

    // ---------------------------------------------------------------------
    // Level call surface
    // ---------------------------------------------------------------------

    /// Print a FATAL line to the error sink and exit with status 1
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) {
        self.fatal_with_code(DEFAULT_EXIT_CODE, message);
    }

    /// Print a FATAL line and exit with `code`
    #[track_caller]
    pub fn fatal_with_code(&self, code: i32, message: impl fmt::Display) {
        self.output(Gate::Always, &self.standard(&Level::FATAL), Target::Err, None, &message);
        self.exit(code);
    }

    #[track_caller]
    pub fn fatal_fmt(&self, args: fmt::Arguments<'_>) {
        self.fatal_with_code(DEFAULT_EXIT_CODE, args);
    }

    #[track_caller]
    pub fn fatal_fmt_with_code(&self, code: i32, args: fmt::Arguments<'_>) {
        self.fatal_with_code(code, args);
    }

    #[track_caller]
    pub fn fatal_map(&self, fields: &FieldMap) {
        self.fatal_map_with_code(DEFAULT_EXIT_CODE, fields);
    }

    #[track_caller]
    pub fn fatal_map_with_code(&self, code: i32, fields: &FieldMap) {
        self.output_map(Gate::Always, &self.standard(&Level::FATAL), Target::Err, None, fields, None);
        self.exit(code);
    }

    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.output(Gate::Always, &self.standard(&Level::ERROR), Target::Err, None, &message);
    }

    #[track_caller]
    pub fn error_fmt(&self, args: fmt::Arguments<'_>) {
        self.error(args);
    }

    #[track_caller]
    pub fn error_map(&self, fields: &FieldMap) {
        self.output_map(Gate::Always, &self.standard(&Level::ERROR), Target::Err, None, fields, None);
    }

    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        self.output(Gate::Always, &self.standard(&Level::WARN), Target::Out, None, &message);
    }

    #[track_caller]
    pub fn warn_fmt(&self, args: fmt::Arguments<'_>) {
        self.warn(args);
    }

    #[track_caller]
    pub fn warn_map(&self, fields: &FieldMap) {
        self.output_map(Gate::Always, &self.standard(&Level::WARN), Target::Out, None, fields, None);
    }

    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.output(Gate::Always, &self.standard(&Level::INFO), Target::Out, None, &message);
    }

    #[track_caller]
    pub fn info_fmt(&self, args: fmt::Arguments<'_>) {
        self.info(args);
    }

    #[track_caller]
    pub fn info_map(&self, fields: &FieldMap) {
        self.output_map(Gate::Always, &self.standard(&Level::INFO), Target::Out, None, fields, None);
    }

    /// Printed only while debug output is enabled
    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.output(Gate::Debug, &self.standard(&Level::DEBUG), Target::Out, None, &message);
    }

    #[track_caller]
    pub fn debug_fmt(&self, args: fmt::Arguments<'_>) {
        self.debug(args);
    }

    #[track_caller]
    pub fn debug_map(&self, fields: &FieldMap) {
        self.output_map(Gate::Debug, &self.standard(&Level::DEBUG), Target::Out, None, fields, None);
    }

    /// Printed only while trace output is enabled
    #[track_caller]
    pub fn trace(&self, message: impl fmt::Display) {
        self.output(Gate::Trace, &self.standard(&Level::TRACE), Target::Out, None, &message);
    }

    #[track_caller]
    pub fn trace_fmt(&self, args: fmt::Arguments<'_>) {
        self.trace(args);
    }

    #[track_caller]
    pub fn trace_map(&self, fields: &FieldMap) {
        self.output_map(Gate::Trace, &self.standard(&Level::TRACE), Target::Out, None, fields, None);
    }

    // ---------------------------------------------------------------------
    // Custom prefixes
    // ---------------------------------------------------------------------

    /// Log with a caller-defined prefix to the normal sink
    ///
    /// The prefix's label joins the shared level column.
    #[track_caller]
    pub fn log(&self, prefix: &Prefix, message: impl fmt::Display) {
        self.registry.reserve_level_width(&prefix.level);
        self.output(Gate::Always, prefix, Target::Out, None, &message);
    }

    #[track_caller]
    pub fn log_fmt(&self, prefix: &Prefix, args: fmt::Arguments<'_>) {
        self.log(prefix, args);
    }

    #[track_caller]
    pub fn log_map(&self, prefix: &Prefix, fields: &FieldMap) {
        self.log_map_with_colors(prefix, fields, None, None);
    }

    /// Like [`log`](Self::log) with the label painted in `color`
    #[track_caller]
    pub fn log_with_color(&self, prefix: &Prefix, color: &Color, message: impl fmt::Display) {
        self.registry.reserve_level_width(&prefix.level);
        self.output(Gate::Always, prefix, Target::Out, Some(color), &message);
    }

    /// Map call with an optional label color and per-key colors
    #[track_caller]
    pub fn log_map_with_colors(
        &self,
        prefix: &Prefix,
        fields: &FieldMap,
        color_override: Option<&Color>,
        key_colors: Option<&KeyColors>,
    ) {
        self.registry.reserve_level_width(&prefix.level);
        self.output_map(Gate::Always, prefix, Target::Out, color_override, fields, key_colors);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Logger")
            .field("name", &state.name)
            .field("color", &state.color)
            .field("debug", &state.debug)
            .field("trace", &state.trace)
            .field("timestamp", &state.timestamp)
            .field("quiet", &state.quiet)
            .field("out", &self.out.name())
            .field("err", &self.err.name())
            .finish()
    }
}

impl Default for Logger {
    /// Logger on stdout, errors included
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use fancy_logger::prelude::*;
/// use std::sync::Arc;
///
/// let registry = Arc::new(Registry::new());
/// let logger = Logger::builder()
///     .name("worker")
///     .registry(Arc::clone(&registry))
///     .output(Arc::new(MemorySink::new()))
///     .debug(true)
///     .timestamp(false)
///     .build();
///
/// assert!(logger.is_debug());
/// assert_eq!(registry.max_name_width(), 6);
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    out: Option<Arc<dyn Sink>>,
    err: Option<Arc<dyn Sink>>,
    registry: Option<Arc<Registry>>,
    pool: Option<Arc<BufferPool>>,
    time_source: Option<TimeSource>,
    timestamp_color: Option<Color>,
    exit_hook: Option<ExitHook>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            out: None,
            err: None,
            registry: None,
            pool: None,
            time_source: None,
            timestamp_color: None,
            exit_hook: None,
        }
    }

    /// Start from a full configuration; later calls override its fields
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn name_format(mut self, format: NameFormat) -> Self {
        self.config.name_format = Some(format);
        self
    }

    /// Force color on or off instead of detecting it from the output sink
    #[must_use = "builder methods return a new value"]
    pub fn color(mut self, enabled: bool) -> Self {
        self.config.color = Some(enabled);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.config.debug = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn trace(mut self, enabled: bool) -> Self {
        self.config.trace = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp(mut self, enabled: bool) -> Self {
        self.config.timestamp = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_color(mut self, color: Color) -> Self {
        self.timestamp_color = Some(color);
        self
    }

    /// Replaces the wall clock; takes precedence over `timestamp_format`
    #[must_use = "builder methods return a new value"]
    pub fn time_source(mut self, source: TimeSource) -> Self {
        self.time_source = Some(source);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn quiet(mut self, enabled: bool) -> Self {
        self.config.quiet = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn field_rules(mut self, rules: FieldRenderRules) -> Self {
        self.config.field_rules = rules;
        self
    }

    /// Normal sink; defaults to stdout
    #[must_use = "builder methods return a new value"]
    pub fn output(mut self, sink: Arc<dyn Sink>) -> Self {
        self.out = Some(sink);
        self
    }

    /// Sink for ERROR and FATAL; defaults to the normal sink
    #[must_use = "builder methods return a new value"]
    pub fn error_output(mut self, sink: Arc<dyn Sink>) -> Self {
        self.err = Some(sink);
        self
    }

    /// Share alignment and the level table; defaults to `Registry::global()`
    #[must_use = "builder methods return a new value"]
    pub fn registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Defaults to `BufferPool::global()`
    #[must_use = "builder methods return a new value"]
    pub fn pool(mut self, pool: Arc<BufferPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Replace `std::process::exit` as the action taken after FATAL lines
    #[must_use = "builder methods return a new value"]
    pub fn exit_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.exit_hook = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> Logger {
        let out = self
            .out
            .unwrap_or_else(|| Arc::new(ConsoleSink::stdout()) as Arc<dyn Sink>);
        let err = self.err.unwrap_or_else(|| Arc::clone(&out));
        let registry = self.registry.unwrap_or_else(Registry::global);
        let pool = self.pool.unwrap_or_else(BufferPool::global);

        let config = self.config;
        if !config.name.is_empty() {
            registry.register_name(&config.name);
        }
        let color = config.color.unwrap_or_else(|| out.is_terminal());
        let time_source = self
            .time_source
            .unwrap_or_else(|| TimeSource::system(config.timestamp_format.clone()));

        Logger {
            state: Mutex::new(LoggerState {
                name: config.name,
                name_format: config.name_format,
                color,
                debug: config.debug,
                trace: config.trace,
                timestamp: config.timestamp,
                quiet: config.quiet,
                timestamp_color: self.timestamp_color,
                time_source,
                field_rules: config.field_rules,
            }),
            out,
            err,
            registry,
            pool,
            metrics: Arc::new(LoggerMetrics::new()),
            exit_hook: self
                .exit_hook
                .unwrap_or_else(|| Arc::new(process_exit) as ExitHook),
        }
    }
}

fn process_exit(code: i32) {
    std::process::exit(code)
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;
    use std::sync::atomic::{AtomicI32, Ordering};

    fn quiet_registry() -> Arc<Registry> {
        Arc::new(Registry::new())
    }

    fn logger(name: &str, out: &MemorySink, err: &MemorySink) -> Logger {
        Logger::builder()
            .name(name)
            .registry(quiet_registry())
            .pool(Arc::new(BufferPool::new(4)))
            .output(Arc::new(out.clone()))
            .error_output(Arc::new(err.clone()))
            .color(false)
            .timestamp(false)
            .exit_hook(|_| {})
            .build()
    }

    #[test]
    fn test_scenario_started() {
        let out = MemorySink::new();
        let err = MemorySink::new();
        let log = logger("svc", &out, &err);

        log.info("started");
        assert_eq!(out.contents_string(), "<svc> [INFO]  started\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_error_routing() {
        let out = MemorySink::new();
        let err = MemorySink::new();
        let log = logger("svc", &out, &err);
        log.registry().set_stack_trace(&Level::ERROR, false);

        log.warn("careful");
        log.error("broken");
        assert_eq!(out.lines(), vec!["<svc> [WARN]  careful"]);
        assert_eq!(err.lines(), vec!["<svc> [ERROR] broken"]);
    }

    #[test]
    fn test_debug_gate() {
        let out = MemorySink::new();
        let log = logger("svc", &out, &MemorySink::new());
        log.registry().set_stack_trace(&Level::DEBUG, false);

        log.debug("hidden");
        assert!(out.is_empty());
        assert_eq!(log.metrics().suppressed(), 1);

        log.set_debug(true).debug("shown");
        assert_eq!(out.contents_string(), "<svc> [DEBUG] shown\n");
    }

    #[test]
    fn test_trace_gate_is_independent_of_debug() {
        let out = MemorySink::new();
        let log = logger("svc", &out, &MemorySink::new());
        log.set_debug(true);
        log.trace("hidden");
        assert!(out.is_empty());

        log.set_trace(true);
        log.trace_fmt(format_args!("n={}", 3));
        assert_eq!(out.contents_string(), "<svc> [TRACE] n=3\n");
        assert!(log.is_trace());
    }

    #[test]
    fn test_stack_trace_points_at_caller() {
        let out = MemorySink::new();
        let err = MemorySink::new();
        let log = logger("svc", &out, &err);

        let line = line!() + 1;
        log.error("with site");
        let lines = err.lines();
        assert!(lines.len() >= 2);
        assert_eq!(lines[0], "<svc> [ERROR] with site");
        assert!(lines[1].starts_with("    at "));
        assert!(lines[1].contains(&format!("logger.rs:{}:", line)));
        assert!(lines[1].contains("test_stack_trace_points_at_caller"));
        assert!(lines[1..].iter().all(|l| l.starts_with("    at ")));
        assert!(!lines.iter().any(|l| l.contains("Logger::output")));
    }

    #[test]
    fn test_quiet_suppresses_fatal_but_exits() {
        let out = MemorySink::new();
        let err = MemorySink::new();
        let code = Arc::new(AtomicI32::new(0));
        let seen = Arc::clone(&code);
        let log = Logger::builder()
            .registry(quiet_registry())
            .output(Arc::new(out.clone()))
            .error_output(Arc::new(err.clone()))
            .quiet(true)
            .exit_hook(move |c| seen.store(c, Ordering::SeqCst))
            .build();

        log.info("x");
        log.fatal_with_code(3, "bye");
        assert!(out.is_empty() && err.is_empty());
        assert_eq!(code.load(Ordering::SeqCst), 3);
        assert_eq!(log.pool().outstanding(), 0);
    }

    #[test]
    fn test_fatal_default_code() {
        let err = MemorySink::new();
        let code = Arc::new(AtomicI32::new(0));
        let seen = Arc::clone(&code);
        let log = Logger::builder()
            .registry(quiet_registry())
            .output(Arc::new(err.clone()))
            .color(false)
            .timestamp(false)
            .exit_hook(move |c| seen.store(c, Ordering::SeqCst))
            .build();

        log.fatal_map(&FieldMap::new().with_field("reason", "disk"));
        assert_eq!(code.load(Ordering::SeqCst), 1);
        assert!(err.contents_string().starts_with("   [FATAL] reason=disk \n"));
    }

    #[test]
    fn test_write_failures_are_swallowed() {
        let out = MemorySink::new();
        out.fail_writes(true);
        let log = logger("svc", &out, &MemorySink::new());
        log.info("lost");
        assert_eq!(log.metrics().write_failures(), 1);
        assert_eq!(log.metrics().lines_written(), 0);
        assert_eq!(log.pool().outstanding(), 0);
    }

    #[test]
    fn test_custom_prefix_widens_column() {
        let out = MemorySink::new();
        let log = logger("svc", &out, &MemorySink::new());
        let audit = Prefix::new(Level::new("SECURITY"), Color::BLUE);

        log.log(&audit, "login");
        log.info("after");
        assert_eq!(
            out.lines(),
            vec!["<svc> [SECURITY] login", "<svc> [INFO]     after"]
        );
    }

    #[test]
    fn test_set_name_joins_column() {
        let out = MemorySink::new();
        let log = logger("a", &out, &MemorySink::new());
        log.set_name("renamed");
        assert_eq!(log.registry().max_name_width(), 7);
        log.info("x");
        assert_eq!(out.contents_string(), "<renamed> [INFO]  x\n");
    }

    #[test]
    fn test_color_detected_from_sink() {
        let log = Logger::builder()
            .registry(quiet_registry())
            .output(Arc::new(MemorySink::new()))
            .build();
        assert!(!log.is_color());
        assert!(log.is_timestamp());
    }

    #[test]
    fn test_debug_impl_names_sinks() {
        let log = logger("svc", &MemorySink::new(), &MemorySink::new());
        let debug = format!("{:?}", log);
        assert!(debug.contains("\"svc\""));
        assert!(debug.contains("memory"));
    }
}
