//! ANSI color sequences
//!
//! A [`Color`] is nothing more than the bytes that switch a terminal into a
//! given style. [`mix`] wraps arbitrary data between a color and [`Color::OFF`].
//! Custom sequences are accepted as-is through [`Color::unchecked`]; a malformed
//! sequence garbles terminal output but never fails.

use std::borrow::Cow;
use std::fmt;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Color(Cow<'static, [u8]>);

impl Color {
    pub const OFF: Color = Color::from_static(b"\x1b[0m");
    pub const RED: Color = Color::from_static(b"\x1b[0;31m");
    pub const GREEN: Color = Color::from_static(b"\x1b[0;32m");
    pub const ORANGE: Color = Color::from_static(b"\x1b[0;33m");
    pub const BLUE: Color = Color::from_static(b"\x1b[0;34m");
    pub const PURPLE: Color = Color::from_static(b"\x1b[0;35m");
    pub const CYAN: Color = Color::from_static(b"\x1b[0;36m");
    pub const GRAY: Color = Color::from_static(b"\x1b[0;37m");

    /// Bold, red, reverse video
    pub const FATAL_RED: Color = Color::from_static(b"\x1b[1m\x1b[31m\x1b[7m");
    pub const DARK_ORANGE: Color = Color::from_static(b"\x1b[1m\x1b[38;5;202m");
    pub const BRIGHT_WHITE: Color = Color::from_static(b"\x1b[1m\x1b[38;5;255m");
    pub const NICE_PURPLE: Color = Color::from_static(b"\x1b[1m\x1b[38;5;99m");

    const fn from_static(bytes: &'static [u8]) -> Self {
        Color(Cow::Borrowed(bytes))
    }

    /// Wrap an arbitrary escape sequence without validating it
    pub fn unchecked(bytes: impl Into<Vec<u8>>) -> Self {
        Color(Cow::Owned(bytes.into()))
    }

    /// 256-color palette foreground, e.g. `Color::ansi256(202)`
    pub fn ansi256(index: u8) -> Self {
        Color::unchecked(format!("\x1b[38;5;{}m", index))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Wrap `data` in this color
    #[must_use]
    pub fn paint(&self, data: &[u8]) -> Vec<u8> {
        mix(data, self)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({:?})", String::from_utf8_lossy(&self.0))
    }
}

impl AsRef<[u8]> for Color {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "console")]
impl From<colored::Color> for Color {
    fn from(color: colored::Color) -> Self {
        Color::unchecked(format!("\x1b[{}m", color.to_fg_str()))
    }
}

/// Concatenate color-on, data and color-off
#[must_use]
pub fn mix(data: &[u8], color: &Color) -> Vec<u8> {
    let mut out = Vec::with_capacity(color.0.len() + data.len() + Color::OFF.0.len());
    out.extend_from_slice(&color.0);
    out.extend_from_slice(data);
    out.extend_from_slice(&Color::OFF.0);
    out
}
