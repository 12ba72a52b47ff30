//! Pooled scratch buffers for rendering log lines
//!
//! Every log call borrows one buffer from a [`BufferPool`] and gives it back
//! when the returned [`PooledBuffer`] is dropped, so the buffer is released on
//! every exit path of the caller. The pool is a bounded `crossbeam_channel`
//! used as a lock-free free list; it is safe to acquire and release from any
//! number of threads. Buffers are never shared between calls.

use super::color::{self, Color};
use super::timestamp::TimestampFormat;
use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

/// Number of idle buffers kept by the process-wide pool
pub const DEFAULT_POOL_CAPACITY: usize = 64;

/// Buffers that grew beyond this are discarded instead of being pooled
const MAX_RETAINED_BYTES: usize = 64 * 1024;

const INITIAL_BUFFER_BYTES: usize = 256;

#[derive(Debug)]
pub struct BufferPool {
    free_tx: Sender<Vec<u8>>,
    free_rx: Receiver<Vec<u8>>,
    outstanding: AtomicUsize,
}

impl BufferPool {
    /// Create a pool retaining at most `capacity` idle buffers
    pub fn new(capacity: usize) -> Self {
        let (free_tx, free_rx) = bounded(capacity.max(1));
        Self {
            free_tx,
            free_rx,
            outstanding: AtomicUsize::new(0),
        }
    }

    /// The process-wide pool shared by loggers that were not given one
    pub fn global() -> Arc<BufferPool> {
        static GLOBAL: OnceLock<Arc<BufferPool>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(BufferPool::new(DEFAULT_POOL_CAPACITY))))
    }

    /// Borrow an empty buffer; `color` decides whether colored appends emit escapes
    pub fn acquire(&self, color: bool) -> PooledBuffer<'_> {
        let bytes = self
            .free_rx
            .try_recv()
            .unwrap_or_else(|_| Vec::with_capacity(INITIAL_BUFFER_BYTES));
        self.outstanding.fetch_add(1, Ordering::AcqRel);
        PooledBuffer {
            pool: self,
            bytes,
            color,
        }
    }

    /// Buffers currently acquired and not yet released
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    /// Buffers sitting idle in the pool
    pub fn idle(&self) -> usize {
        self.free_rx.len()
    }

    fn release(&self, mut bytes: Vec<u8>) {
        self.outstanding.fetch_sub(1, Ordering::AcqRel);
        if bytes.capacity() > MAX_RETAINED_BYTES {
            return;
        }
        bytes.clear();
        // A full pool simply lets the buffer drop.
        let _ = self.free_tx.try_send(bytes);
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}

/// A buffer on loan from a [`BufferPool`]
#[derive(Debug)]
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
    bytes: Vec<u8>,
    color: bool,
}

impl PooledBuffer<'_> {
    pub fn append(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    pub fn append_str(&mut self, data: &str) {
        self.bytes.extend_from_slice(data.as_bytes());
    }

    pub fn append_byte(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    /// Append `data` wrapped in `color`, or plain when color is disabled
    pub fn append_colored(&mut self, data: &[u8], color: &Color) {
        if self.color {
            self.bytes.extend_from_slice(&color::mix(data, color));
        } else {
            self.bytes.extend_from_slice(data);
        }
    }

    /// Start a colored run; no-op when color is disabled
    pub fn color_on(&mut self, color: &Color) {
        if self.color {
            self.bytes.extend_from_slice(color.as_bytes());
        }
    }

    /// End a colored run started with [`color_on`](Self::color_on)
    pub fn color_off(&mut self) {
        if self.color {
            self.bytes.extend_from_slice(Color::OFF.as_bytes());
        }
    }

    pub fn append_space(&mut self) {
        self.bytes.push(b' ');
    }

    pub fn append_spaces(&mut self, count: usize) {
        self.bytes.resize(self.bytes.len() + count, b' ');
    }

    pub fn append_int(&mut self, n: i64) {
        self.append_str(&n.to_string());
    }

    pub fn append_timestamp(&mut self, at: &DateTime<Utc>, format: &TimestampFormat) {
        self.append_str(&format.format(at));
    }

    pub fn ends_with(&self, byte: u8) -> bool {
        self.bytes.last() == Some(&byte)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.bytes));
    }
}
