//! Line rendering
//!
//! Both renderers are pure: given a prefix, a payload, a configuration
//! snapshot, the column widths and an optional call site, they always write
//! the same bytes. Layout of one line:
//!
//! ```text
//! <name> ␣pad [LEVEL]␣pad␣ timestamp␣ payload\n
//!     at src/file.rs:10:5\n          (only for stack-trace prefixes)
//! ```
//!
//! A logger without a name still reserves a three-space gutter so that its
//! payload lines up with named loggers using the default `<name>` format.

use super::buffer::PooledBuffer;
use super::call_site::CallSite;
use super::color::Color;
use super::config::{FieldRenderRules, NameFormat, NestedMode};
use super::fields::{sorted_keys, FieldMap, FieldValue};
use super::level::Prefix;
use super::registry::ColumnWidths;
use super::timestamp::TimeSource;
use std::collections::HashMap;

/// Spaces reserved in place of `<` `>` and the trailing space of an empty name
pub const NAME_GUTTER: usize = 3;

const STACK_INDENT: &str = "    at ";

/// Everything from a logger's configuration that a render reads
///
/// Taken under the logger's lock before rendering starts, so a render never
/// sees a half-applied configuration change.
#[derive(Debug, Clone, Default)]
pub struct RenderSnapshot {
    pub name: String,
    pub name_format: Option<NameFormat>,
    pub color: bool,
    pub timestamp: bool,
    pub timestamp_color: Option<Color>,
    pub time_source: TimeSource,
    pub field_rules: FieldRenderRules,
}

/// Per-key colors for map payloads, e.g. `{"status": ORANGE}`
pub type KeyColors = HashMap<String, Color>;

struct FieldScheme<'a> {
    key: &'a Color,
    separator: &'a Color,
    value: &'a Color,
}

const DEFAULT_SCHEME: FieldScheme<'static> = FieldScheme {
    key: &Color::PURPLE,
    separator: &Color::ORANGE,
    value: &Color::CYAN,
};

impl<'a> FieldScheme<'a> {
    fn uniform(color: &'a Color) -> Self {
        Self {
            key: color,
            separator: color,
            value: color,
        }
    }
}

/// Render a free-form message line into `buf`
///
/// A single trailing newline is guaranteed: one is added unless the message
/// already ends with `'\n'`.
pub fn render_line(
    buf: &mut PooledBuffer<'_>,
    snapshot: &RenderSnapshot,
    widths: ColumnWidths,
    prefix: &Prefix,
    color_override: Option<&Color>,
    message: &str,
    call_site: Option<&CallSite>,
) {
    write_preamble(buf, snapshot, widths, prefix, color_override);
    buf.append_str(message);
    if !buf.ends_with(b'\n') {
        buf.append_byte(b'\n');
    }
    if let Some(site) = call_site {
        write_call_site(buf, site);
    }
}

/// Render a field map line into `buf`, keys in lexicographic order
#[allow(clippy::too_many_arguments)]
pub fn render_fields(
    buf: &mut PooledBuffer<'_>,
    snapshot: &RenderSnapshot,
    widths: ColumnWidths,
    prefix: &Prefix,
    color_override: Option<&Color>,
    fields: &FieldMap,
    key_colors: Option<&KeyColors>,
    call_site: Option<&CallSite>,
) {
    write_preamble(buf, snapshot, widths, prefix, color_override);

    for (key, value) in fields.sorted() {
        let scheme = match key_colors.and_then(|colors| colors.get(key)) {
            Some(color) => FieldScheme::uniform(color),
            None => DEFAULT_SCHEME,
        };
        write_field(buf, &snapshot.field_rules, &scheme, key, value);
        buf.append_space();
    }
    buf.append_byte(b'\n');

    if let Some(site) = call_site {
        write_call_site(buf, site);
    }
}

fn write_preamble(
    buf: &mut PooledBuffer<'_>,
    snapshot: &RenderSnapshot,
    widths: ColumnWidths,
    prefix: &Prefix,
    color_override: Option<&Color>,
) {
    let name = snapshot.name.as_str();
    let mut padding = widths.name.saturating_sub(name.chars().count());
    if name.is_empty() {
        padding += NAME_GUTTER;
    } else {
        let label = match &snapshot.name_format {
            Some(format) => format.render(name),
            None => NameFormat::default().render(name),
        };
        buf.append_colored(label.as_bytes(), &Color::NICE_PURPLE);
        buf.append_space();
    }
    buf.append_spaces(padding);

    let color = color_override.unwrap_or(&prefix.color);
    buf.append_colored(prefix.level.to_prefix().as_bytes(), color);
    buf.append_spaces(widths.prefix.saturating_sub(prefix.level.width()) + 1);

    if snapshot.timestamp {
        let (at, format) = snapshot.time_source.now();
        buf.color_on(snapshot.timestamp_color.as_ref().unwrap_or(&Color::BLUE));
        buf.append_timestamp(&at, &format);
        buf.color_off();
        buf.append_space();
    }
}

fn write_field(
    buf: &mut PooledBuffer<'_>,
    rules: &FieldRenderRules,
    scheme: &FieldScheme<'_>,
    key: &str,
    value: &FieldValue,
) {
    buf.append_colored(key.as_bytes(), scheme.key);
    match value {
        FieldValue::Map(inner) if rules.nested_maps == NestedMode::Bracketed => {
            let entries = inner
                .sorted()
                .into_iter()
                .map(|(k, v)| (k, v.to_string()));
            write_group(buf, scheme, entries);
        }
        FieldValue::StringLists(lists) if rules.string_lists == NestedMode::Bracketed => {
            let entries = sorted_keys(lists)
                .into_iter()
                .map(|k| (k, format!("[{}]", lists[k].join(" "))));
            write_group(buf, scheme, entries);
        }
        scalar => {
            buf.append_colored(b"=", scheme.separator);
            buf.append_colored(scalar.to_string().as_bytes(), scheme.value);
        }
    }
}

/// `[ k:v  k2:v2 ]`
fn write_group<'k, I>(buf: &mut PooledBuffer<'_>, scheme: &FieldScheme<'_>, entries: I)
where
    I: Iterator<Item = (&'k str, String)>,
{
    buf.append_colored(b"[", scheme.separator);
    for (key, value) in entries {
        buf.append_space();
        buf.append_colored(key.as_bytes(), scheme.key);
        buf.append_colored(b":", scheme.separator);
        buf.append_colored(value.as_bytes(), scheme.value);
        buf.append_space();
    }
    buf.append_colored(b"]", scheme.separator);
}

/// One orange line per frame: `    at function (file:line:column)`
fn write_call_site(buf: &mut PooledBuffer<'_>, site: &CallSite) {
    for frame in site.frames() {
        buf.color_on(&Color::ORANGE);
        buf.append_str(STACK_INDENT);
        if let Some(function) = &frame.function {
            buf.append_str(function);
            buf.append_str(" (");
        }
        buf.append_str(&frame.file);
        buf.append_byte(b':');
        buf.append_int(i64::from(frame.line));
        if let Some(column) = frame.column {
            buf.append_byte(b':');
            buf.append_int(i64::from(column));
        }
        if frame.function.is_some() {
            buf.append_byte(b')');
        }
        buf.color_off();
        buf.append_byte(b'\n');
    }
}
