//! In-memory capture sink

use crate::core::{LoggerError, Result, Sink};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Collects every written line; clones share the same storage
///
/// Useful for asserting on output and for adapters that forward logs
/// elsewhere. `fail_writes(true)` makes every write fail, which exercises the
/// logger's drop-on-error path.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Arc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    bytes: Mutex<Vec<u8>>,
    writes: AtomicUsize,
    failing: AtomicBool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Vec<u8> {
        self.inner.bytes.lock().clone()
    }

    pub fn contents_string(&self) -> String {
        String::from_utf8_lossy(&self.inner.bytes.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents_string().lines().map(str::to_string).collect()
    }

    /// Number of successful `write` calls
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.bytes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.inner.bytes.lock().clear();
        self.inner.writes.store(0, Ordering::Release);
    }

    pub fn fail_writes(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::Release);
    }
}

impl Sink for MemorySink {
    fn write(&self, line: &[u8]) -> Result<()> {
        if self.inner.failing.load(Ordering::Acquire) {
            return Err(LoggerError::sink_write(
                "memory",
                std::io::Error::other("writes disabled"),
            ));
        }
        self.inner.bytes.lock().extend_from_slice(line);
        self.inner.writes.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
