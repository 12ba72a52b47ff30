//! Shared level table and column alignment
//!
//! A [`Registry`] owns two things every logger attached to it shares:
//!
//! - the Level → [`Prefix`] table, including which levels capture a call site
//! - the alignment widths: the widest logger name and the widest level label
//!   seen so far
//!
//! Widths only ever grow. Registering a wider name or level immediately widens
//! the columns of every logger on the same registry, which keeps output from
//! different loggers lined up.
//!
//! # Example
//!
//! ```
//! use fancy_logger::{Level, Registry};
//!
//! let registry = Registry::new();
//! registry.register_name("db");
//! registry.register_name("http");
//! registry.register_name("io");
//! assert_eq!(registry.max_name_width(), 4);
//! assert_eq!(registry.max_prefix_width(), 5);
//!
//! registry.register_level(Level::new("OPTIONS"));
//! assert_eq!(registry.max_prefix_width(), 7);
//! ```

use super::color::Color;
use super::level::{Level, Prefix};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

#[derive(Debug)]
pub struct Registry {
    prefixes: RwLock<HashMap<Level, Prefix>>,
    max_name_width: AtomicUsize,
    max_prefix_width: AtomicUsize,
}

impl Registry {
    /// A registry holding the six standard levels and no names
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The process-wide registry used by loggers built without one
    pub fn global() -> Arc<Registry> {
        static GLOBAL: OnceLock<Arc<Registry>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Registry::new())))
    }

    /// Widen the name column to fit `name`; returns the resulting width
    pub fn register_name(&self, name: &str) -> usize {
        let width = name.chars().count();
        let previous = self.max_name_width.fetch_max(width, Ordering::AcqRel);
        previous.max(width)
    }

    /// Make sure `level` has a prefix and widen the level column to fit it
    ///
    /// Unknown custom levels get a gray prefix without stack traces.
    pub fn register_level(&self, level: Level) -> Prefix {
        if let Some(prefix) = self.prefixes.read().get(&level) {
            return prefix.clone();
        }
        let prefix = Prefix::standard(&level).unwrap_or_else(|| Prefix::new(level, Color::GRAY));
        let mut prefixes = self.prefixes.write();
        let stored = prefixes
            .entry(prefix.level.clone())
            .or_insert(prefix)
            .clone();
        self.widen_prefix(&stored.level);
        stored
    }

    /// Insert or replace a prefix
    pub fn register_prefix(&self, prefix: Prefix) {
        self.widen_prefix(&prefix.level);
        self.prefixes.write().insert(prefix.level.clone(), prefix);
    }

    /// Merge a whole table of prefixes, replacing entries for the same level
    pub fn register_prefixes<I>(&self, prefixes: I)
    where
        I: IntoIterator<Item = Prefix>,
    {
        let mut table = self.prefixes.write();
        for prefix in prefixes {
            self.widen_prefix(&prefix.level);
            table.insert(prefix.level.clone(), prefix);
        }
    }

    /// Switch call-site capture for `level`; returns false if the level is unknown
    pub fn set_stack_trace(&self, level: &Level, enabled: bool) -> bool {
        match self.prefixes.write().get_mut(level) {
            Some(prefix) => {
                prefix.requires_stack_trace = enabled;
                true
            }
            None => false,
        }
    }

    pub fn prefix(&self, level: &Level) -> Option<Prefix> {
        self.prefixes.read().get(level).cloned()
    }

    /// Prefix for a standard level, falling back to the built-in default if the
    /// table no longer has it
    pub(crate) fn standard_prefix(&self, level: &Level) -> Prefix {
        self.prefix(level)
            .or_else(|| Prefix::standard(level))
            .unwrap_or_else(|| Prefix::new(level.clone(), Color::GRAY))
    }

    /// Registered levels in label order
    pub fn levels(&self) -> Vec<Level> {
        let mut levels: Vec<Level> = self.prefixes.read().keys().cloned().collect();
        levels.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        levels
    }

    pub fn max_name_width(&self) -> usize {
        self.max_name_width.load(Ordering::Acquire)
    }

    pub fn max_prefix_width(&self) -> usize {
        self.max_prefix_width.load(Ordering::Acquire)
    }

    /// Both widths read together for one render
    pub fn widths(&self) -> ColumnWidths {
        ColumnWidths {
            name: self.max_name_width(),
            prefix: self.max_prefix_width(),
        }
    }

    /// Widen the level column for `level` without touching the prefix table
    pub fn reserve_level_width(&self, level: &Level) {
        self.widen_prefix(level);
    }

    fn widen_prefix(&self, level: &Level) {
        self.max_prefix_width
            .fetch_max(level.width(), Ordering::AcqRel);
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Column widths used to pad one line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnWidths {
    pub name: usize,
    pub prefix: usize,
}

/// Builder for a [`Registry`] with a custom stack-trace table or extra levels
///
/// # Example
///
/// ```
/// use fancy_logger::{Color, Level, Prefix, Registry};
///
/// let registry = Registry::builder()
///     .stack_trace_levels([Level::FATAL, Level::TRACE])
///     .prefix(Prefix::new(Level::new("AUDIT"), Color::BLUE))
///     .build();
///
/// assert!(registry.prefix(&Level::TRACE).unwrap().requires_stack_trace);
/// assert!(!registry.prefix(&Level::ERROR).unwrap().requires_stack_trace);
/// ```
pub struct RegistryBuilder {
    stack_trace_levels: Option<Vec<Level>>,
    extra: Vec<Prefix>,
    names: Vec<String>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            stack_trace_levels: None,
            extra: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Replace the default stack-trace table (FATAL, ERROR, DEBUG)
    #[must_use = "builder methods return a new value"]
    pub fn stack_trace_levels<I>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = Level>,
    {
        self.stack_trace_levels = Some(levels.into_iter().collect());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, prefix: Prefix) -> Self {
        self.extra.push(prefix);
        self
    }

    /// Reserve name width up front
    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn build(self) -> Registry {
        let registry = Registry {
            prefixes: RwLock::new(HashMap::new()),
            max_name_width: AtomicUsize::new(0),
            max_prefix_width: AtomicUsize::new(0),
        };

        let standard = Level::STANDARD.into_iter().filter_map(|level| {
            let prefix = Prefix::standard(&level)?;
            Some(match &self.stack_trace_levels {
                Some(levels) => {
                    let enabled = levels.contains(&prefix.level);
                    prefix.with_stack_trace(enabled)
                }
                None => prefix,
            })
        });
        registry.register_prefixes(standard);
        registry.register_prefixes(self.extra);
        for name in &self.names {
            registry.register_name(name);
        }
        registry
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
