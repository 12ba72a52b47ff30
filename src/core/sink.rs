//! Sink trait for rendered log lines

use super::error::Result;

/// A byte destination for finished log lines
///
/// `write` receives one complete line (including its trailing stack line, if
/// any) and must write it in one piece so concurrent lines never interleave.
/// Implementations lock internally; sinks are shared between threads and
/// between the normal and error streams of a logger.
pub trait Sink: Send + Sync {
    fn write(&self, line: &[u8]) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;

    /// Whether the sink is an interactive terminal; decides the default color mode
    fn is_terminal(&self) -> bool {
        false
    }
}
