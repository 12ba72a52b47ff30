//! Integration tests for fancy_logger
//!
//! These tests verify:
//! - Line layout and column alignment across loggers
//! - Level gating and quiet mode
//! - Fatal exit behavior
//! - Sink routing and failure handling
//! - File output
//! - Configuration loading

use fancy_logger::prelude::*;
use fancy_logger::{fields, BufferPool, DEFAULT_EXIT_CODE};
use std::fs;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

struct Harness {
    registry: Arc<Registry>,
    pool: Arc<BufferPool>,
    out: MemorySink,
    err: MemorySink,
    exit_code: Arc<AtomicI32>,
}

impl Harness {
    fn new() -> Self {
        Self {
            registry: Arc::new(Registry::new()),
            pool: Arc::new(BufferPool::new(8)),
            out: MemorySink::new(),
            err: MemorySink::new(),
            exit_code: Arc::new(AtomicI32::new(-1)),
        }
    }

    fn builder(&self) -> LoggerBuilder {
        let exit_code = Arc::clone(&self.exit_code);
        Logger::builder()
            .registry(Arc::clone(&self.registry))
            .pool(Arc::clone(&self.pool))
            .output(Arc::new(self.out.clone()))
            .error_output(Arc::new(self.err.clone()))
            .color(false)
            .timestamp(false)
            .exit_hook(move |code| exit_code.store(code, Ordering::SeqCst))
    }

    fn logger(&self, name: &str) -> Logger {
        self.builder().name(name).build()
    }
}

#[test]
fn test_started_scenario() {
    let h = Harness::new();
    let logger = h.logger("svc");
    logger.info("started");
    assert_eq!(h.out.contents_string(), "<svc> [INFO]  started\n");
}

#[test]
fn test_alignment_across_loggers() {
    let h = Harness::new();
    let db = h.logger("db");
    let service = h.logger("service");

    db.info("connected");
    service.warn("slow");

    assert_eq!(
        h.out.lines(),
        vec!["<db>      [INFO]  connected", "<service> [WARN]  slow"]
    );
}

#[test]
fn test_alignment_only_grows() {
    let h = Harness::new();
    let a = h.logger("a");
    a.info("one");
    let first = h.out.lines()[0].find('[').unwrap();

    let _wide = h.logger("a-much-longer-name");
    let _short = h.logger("b");
    a.info("two");
    let second = h.out.lines()[1].find('[').unwrap();

    assert!(second > first);
    assert_eq!(h.registry.max_name_width(), "a-much-longer-name".len());
}

#[test]
fn test_unnamed_logger_aligns_with_named() {
    let h = Harness::new();
    let named = h.logger("svc");
    let unnamed = h.builder().build();

    named.info("x");
    unnamed.info("y");
    let lines = h.out.lines();
    assert_eq!(lines[0].find('['), lines[1].find('['));
}

#[test]
fn test_debug_and_trace_gating() {
    let h = Harness::new();
    h.registry.set_stack_trace(&Level::DEBUG, false);
    let logger = h.logger("svc");

    logger.debug("d0");
    logger.trace("t0");
    assert!(h.out.is_empty());

    logger.set_debug(true);
    logger.debug("d1");
    logger.trace("t1");

    logger.set_debug(false).set_trace(true);
    logger.debug("d2");
    logger.trace("t2");

    assert_eq!(
        h.out.lines(),
        vec!["<svc> [DEBUG] d1", "<svc> [TRACE] t2"]
    );
    assert_eq!(logger.metrics().suppressed(), 4);
}

#[test]
fn test_quiet_mode() {
    let h = Harness::new();
    let logger = h.builder().name("svc").quiet(true).build();

    logger.info("x");
    logger.error_map(&fields! { "k" => 1 });
    logger.fatal("bye");

    assert!(h.out.is_empty());
    assert!(h.err.is_empty());
    assert_eq!(h.exit_code.load(Ordering::SeqCst), DEFAULT_EXIT_CODE);
    assert_eq!(h.pool.outstanding(), 0);

    logger.set_quiet(false).info("back");
    assert_eq!(h.out.lines(), vec!["<svc> [INFO]  back"]);
}

#[test]
fn test_fatal_writes_then_exits() {
    let h = Harness::new();
    let logger = h.logger("svc");
    logger.fatal_fmt_with_code(7, format_args!("lost {}", "disk"));

    let lines = h.err.lines();
    assert_eq!(lines[0], "<svc> [FATAL] lost disk");
    assert!(lines[1].starts_with("    at "));
    assert!(lines[1].contains("integration_tests.rs:"));
    assert_eq!(h.exit_code.load(Ordering::SeqCst), 7);
}

#[inline(never)]
fn report_failure(logger: &Logger) {
    logger.error("nested failure");
}

#[inline(never)]
fn handle_request(logger: &Logger) {
    report_failure(logger);
}

#[test]
fn test_stack_lists_every_caller() {
    let h = Harness::new();
    let logger = h.logger("svc");
    handle_request(&logger);

    let lines = h.err.lines();
    assert_eq!(lines[0], "<svc> [ERROR] nested failure");
    let stack = &lines[1..];
    assert!(stack.iter().all(|l| l.starts_with("    at ")));
    assert!(stack[0].contains("report_failure"));
    assert!(stack[0].contains("integration_tests.rs:"));
    let outer = stack.iter().position(|l| l.contains("handle_request"));
    assert!(matches!(outer, Some(i) if i > 0));
    assert!(!stack.iter().any(|l| l.contains("fancy_logger::")));
}

#[test]
fn test_error_routing() {
    let h = Harness::new();
    h.registry.set_stack_trace(&Level::ERROR, false);
    let logger = h.logger("svc");

    logger.info("to out");
    logger.error("to err");

    assert_eq!(h.out.lines(), vec!["<svc> [INFO]  to out"]);
    assert_eq!(h.err.lines(), vec!["<svc> [ERROR] to err"]);
}

#[test]
fn test_single_sink_constructor() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .registry(Arc::new(Registry::new()))
        .output(Arc::new(sink.clone()))
        .color(false)
        .timestamp(false)
        .build();
    logger.registry().set_stack_trace(&Level::ERROR, false);

    logger.info("a");
    logger.error("b");
    assert_eq!(sink.lines().len(), 2);
}

#[test]
fn test_newline_normalization() {
    let h = Harness::new();
    let logger = h.logger("svc");
    logger.info("hello");
    logger.info("hello\n");
    assert_eq!(
        h.out.contents_string(),
        "<svc> [INFO]  hello\n<svc> [INFO]  hello\n"
    );
}

#[test]
fn test_color_toggle() {
    let h = Harness::new();
    let logger = h.logger("svc");

    logger.set_color(true).info("colored");
    logger.set_color(false).info("plain");

    let lines = h.out.lines();
    assert!(lines[0].contains('\x1b'));
    assert!(!lines[1].contains('\x1b'));
}

#[test]
fn test_field_map_rendering() {
    let h = Harness::new();
    let logger = h.logger("svc");
    logger.info_map(&fields! {
        "uri" => "/users",
        "method" => "GET",
        "status" => 200,
        "user" => fields! { "id" => 7, "name" => "ann" },
    });
    assert_eq!(
        h.out.contents_string(),
        "<svc> [INFO]  method=GET status=200 uri=/users user[ id:7  name:ann ] \n"
    );
}

#[test]
fn test_custom_level() {
    let h = Harness::new();
    let logger = h.logger("svc");
    let audit = h.registry.register_level(Level::new("AUDIT"));
    assert_eq!(audit.color, Color::GRAY);

    logger.log(&audit, "granted");
    logger.info("next");
    assert_eq!(
        h.out.lines(),
        vec!["<svc> [AUDIT] granted", "<svc> [INFO]  next"]
    );
}

#[test]
fn test_fixed_timestamp() {
    use chrono::TimeZone;

    let h = Harness::new();
    let at = chrono::Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
    let logger = h
        .builder()
        .name("svc")
        .timestamp(true)
        .time_source(TimeSource::fixed(at, TimestampFormat::Kitchen))
        .build();

    logger.info("tick");
    assert_eq!(h.out.contents_string(), "<svc> [INFO]  10:30:45 tick\n");
}

#[test]
fn test_invalid_timestamp_layout() {
    use chrono::TimeZone;

    let err = LoggerConfig::from_json(r#"{"timestamp_format": {"custom": "%Q"}}"#).unwrap_err();
    assert!(err.to_string().contains("%Q"));

    let h = Harness::new();
    let logger = h
        .builder()
        .name("svc")
        .timestamp(true)
        .timestamp_format(TimestampFormat::Custom("%Q".to_string()))
        .build();
    logger.info("system clock");
    assert_eq!(h.out.lines().len(), 1);

    let at = chrono::Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
    let fixed = h
        .builder()
        .name("svc")
        .timestamp(true)
        .time_source(TimeSource::fixed(at, TimestampFormat::Custom("%H %Q".to_string())))
        .build();
    fixed.info("fixed clock");
    assert_eq!(h.out.lines()[1], "<svc> [INFO]  2025-01-08T10:30:45Z fixed clock");
}

#[test]
fn test_timestamp_color_override() {
    use chrono::TimeZone;

    let h = Harness::new();
    let at = chrono::Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
    let logger = h
        .builder()
        .name("svc")
        .color(true)
        .timestamp(true)
        .timestamp_color(Color::GRAY)
        .time_source(TimeSource::fixed(at, TimestampFormat::Rfc3339))
        .build();

    logger.info("built gray");
    logger.set_timestamp_color(Some(Color::ORANGE)).info("set orange");
    logger.set_timestamp_color(None).info("default blue");

    let lines = h.out.lines();
    assert!(lines[0].contains("\x1b[0;37m2025-01-08T10:30:45Z\x1b[0m"));
    assert!(lines[1].contains("\x1b[0;33m2025-01-08T10:30:45Z\x1b[0m"));
    assert!(lines[2].contains("\x1b[0;34m2025-01-08T10:30:45Z\x1b[0m"));
    assert!(!lines[2].contains("\x1b[0;33m2025"));
}

#[test]
fn test_failing_sink_is_silent() {
    let h = Harness::new();
    let logger = h.logger("svc");
    h.out.fail_writes(true);

    for i in 0..5 {
        logger.info(format!("line {}", i));
    }
    assert_eq!(logger.metrics().write_failures(), 5);
    assert_eq!(logger.metrics().drop_rate(), 100.0);
    assert_eq!(h.pool.outstanding(), 0);

    h.out.fail_writes(false);
    logger.info("recovered");
    assert_eq!(h.out.lines(), vec!["<svc> [INFO]  recovered"]);
}

#[test]
fn test_file_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("fancy.log");

    {
        let sink = FileSink::new(&log_file).expect("Failed to create sink");
        let logger = Logger::builder()
            .name("file")
            .registry(Arc::new(Registry::new()))
            .output(Arc::new(sink))
            .timestamp(false)
            .build();
        assert!(!logger.is_color());

        logger.info("first");
        logger.warn_fmt(format_args!("second {}", 2));
        logger.flush().expect("Failed to flush");
    }

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content, "<file> [INFO]  first\n<file> [WARN]  second 2\n");
}

#[test]
fn test_writer_sink() {
    let sink = Arc::new(WriterSink::new(Vec::<u8>::new()).with_name("vec"));
    let logger = Logger::builder()
        .name("w")
        .registry(Arc::new(Registry::new()))
        .output(sink.clone())
        .color(false)
        .timestamp(false)
        .build();

    logger.info("into a vec");
    drop(logger);
    let sink = Arc::try_unwrap(sink).ok().expect("sink still shared");
    assert_eq!(sink.into_inner(), b"<w> [INFO]  into a vec\n".to_vec());
}

#[test]
fn test_from_config() {
    let config = LoggerConfig::from_json(
        r#"{
            "name": "cfg",
            "name_format": "({})",
            "color": false,
            "timestamp": false,
            "debug": true,
            "field_rules": { "nested_maps": "inline" }
        }"#,
    )
    .expect("Failed to parse config");

    let out = MemorySink::new();
    let logger = Logger::builder()
        .config(config)
        .registry(Arc::new(Registry::builder().stack_trace_levels([Level::FATAL]).build()))
        .output(Arc::new(out.clone()))
        .build();

    assert!(logger.is_debug());
    logger.debug_map(&fields! { "user" => fields! { "id" => 1 } });
    assert_eq!(out.contents_string(), "(cfg) [DEBUG] user=map[id:1] \n");
}

#[test]
fn test_http_logger_shares_registry() {
    let h = Harness::new();
    let app = h.logger("app");
    let http = HttpLogger::from_builder(h.builder().name("api"));

    http.options_method(fields! { "uri" => "/" }, 204);
    app.info("ok");

    assert_eq!(
        h.out.lines(),
        vec!["{api} [OPTIONS] status=204 uri=/ ", "<app> [INFO]    ok"]
    );
}
