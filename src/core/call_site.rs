//! Call-stack capture for stack-trace prefixes
//!
//! Every public logging method is `#[track_caller]`, so [`Location::caller`]
//! names the line that called the logger. That location anchors a captured
//! backtrace: frames printed before it belong to the logger and are dropped,
//! the anchor and everything below it are kept. Without symbols the anchor
//! cannot be found and the stack is the caller's location alone.

use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::path::Path;

/// One resolved frame: `function (file:line:column)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    pub function: Option<String>,
    pub file: String,
    pub line: u32,
    pub column: Option<u32>,
}

impl StackFrame {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            function: None,
            file: file.into(),
            line,
            column: None,
        }
    }

    #[must_use]
    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    #[must_use]
    pub fn with_column(mut self, column: u32) -> Self {
        self.column = Some(column);
        self
    }

    fn is_at(&self, anchor: &StackFrame) -> bool {
        self.line == anchor.line && Path::new(&self.file).ends_with(&anchor.file)
    }
}

impl From<&Location<'_>> for StackFrame {
    fn from(location: &Location<'_>) -> Self {
        StackFrame::new(location.file(), location.line()).with_column(location.column())
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(function) = &self.function {
            write!(f, "{} (", function)?;
        }
        write!(f, "{}:{}", self.file, self.line)?;
        if let Some(column) = self.column {
            write!(f, ":{}", column)?;
        }
        if self.function.is_some() {
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// The calling frame followed by the frames that led to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    caller: StackFrame,
    callers: Vec<StackFrame>,
}

impl CallSite {
    pub fn new(caller: StackFrame, callers: Vec<StackFrame>) -> Self {
        Self { caller, callers }
    }

    #[track_caller]
    pub fn capture() -> Self {
        let anchor = StackFrame::from(Location::caller());
        let trace = Backtrace::force_capture();
        Self::resolve(anchor, &trace.to_string())
    }

    fn resolve(anchor: StackFrame, trace: &str) -> Self {
        let frames = parse_frames(trace);
        let position = frames.iter().position(|frame| frame.is_at(&anchor));
        let Some(position) = position else {
            return Self::from(anchor);
        };

        let mut kept = frames.into_iter().skip(position);
        let function = kept.next().and_then(|frame| frame.function);
        Self {
            caller: StackFrame { function, ..anchor },
            callers: kept.collect(),
        }
    }

    pub fn caller(&self) -> &StackFrame {
        &self.caller
    }

    /// Caller first, outermost frame last
    pub fn frames(&self) -> impl Iterator<Item = &StackFrame> {
        std::iter::once(&self.caller).chain(&self.callers)
    }
}

impl From<StackFrame> for CallSite {
    fn from(caller: StackFrame) -> Self {
        Self::new(caller, Vec::new())
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", frame)?;
        }
        Ok(())
    }
}

/// Frames with a known source location, in the order `Backtrace` prints them
///
/// A symbol line is `N: path::to::function` (inlined symbols drop the index)
/// and its location follows as `at file:line:column`. Symbols without a
/// location are skipped.
fn parse_frames(trace: &str) -> Vec<StackFrame> {
    let mut frames = Vec::new();
    let mut function: Option<&str> = None;

    for line in trace.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match line.strip_prefix("at ") {
            Some(location) => {
                if let (Some(name), Some(mut frame)) = (function.take(), parse_location(location)) {
                    frame.function = Some(name.to_string());
                    frames.push(frame);
                }
            }
            None => function = Some(strip_index(line)),
        }
    }
    frames
}

fn strip_index(line: &str) -> &str {
    match line.split_once(": ") {
        Some((index, name)) if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) => {
            name
        }
        _ => line,
    }
}

fn parse_location(location: &str) -> Option<StackFrame> {
    let (rest, last) = location.rsplit_once(':')?;
    let last: u32 = last.parse().ok()?;
    if let Some((file, line)) = rest.rsplit_once(':') {
        if let Ok(line) = line.parse() {
            return Some(StackFrame::new(file, line).with_column(last));
        }
    }
    Some(StackFrame::new(rest, last))
}
