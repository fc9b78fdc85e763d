//! Terminal detection and colour helpers for console output

use owo_colors::{OwoColorize, colors::css};

/// Columns below which reports switch to the compact layout.
const NARROW_WIDTH: u16 = 60;

/// Whether stdout should receive ANSI colours.
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Whether the terminal is too narrow for the padded report columns.
pub fn is_narrow() -> bool {
    terminal_size::terminal_size().is_some_and(|(width, _)| width.0 < NARROW_WIDTH)
}

fn paint(text: &str, styled: impl FnOnce(&str) -> String) -> String {
    if supports_color() {
        styled(text)
    } else {
        text.to_string()
    }
}

/// Colour roles used by registration messages
pub trait Colorize {
    /// A seat was secured (green)
    fn success(&self) -> String;
    /// Waitlisted or otherwise incomplete (amber)
    fn warning(&self) -> String;
    /// The request could not be carried out (red)
    fn failure(&self) -> String;
    /// Secondary text
    fn dim(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        paint(self, |s| s.fg::<css::Green>().to_string())
    }

    fn warning(&self) -> String {
        paint(self, |s| s.fg::<css::Orange>().to_string())
    }

    fn failure(&self) -> String {
        paint(self, |s| s.fg::<css::Red>().to_string())
    }

    fn dim(&self) -> String {
        paint(self, |s| s.dimmed().to_string())
    }
}
