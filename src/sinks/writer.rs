//! Sink over any `std::io::Write`

use crate::core::{LoggerError, Result, Sink};
use parking_lot::Mutex;
use std::io::Write;

/// Wraps an arbitrary writer (socket, pipe, `Vec<u8>`) behind a mutex
pub struct WriterSink<W> {
    name: String,
    terminal: bool,
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            name: "writer".to_string(),
            terminal: false,
            writer: Mutex::new(writer),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Report the writer as an interactive terminal
    #[must_use]
    pub fn with_terminal(mut self, terminal: bool) -> Self {
        self.terminal = terminal;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&self, line: &[u8]) -> Result<()> {
        self.writer
            .lock()
            .write_all(line)
            .map_err(|e| LoggerError::sink_write(&self.name, e))
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }
}
