//! Colors and rendered segments
//!
//! A rule's color specification is parsed once at load time into a [`Color`],
//! which knows its SGR (Select Graphic Rendition) parameter string. The
//! renderer produces [`Segment`]s that borrow the input text and print
//! themselves wrapped in a color-start / reset pair.

use std::fmt;

use crossterm::style::{Attribute, SetAttribute};
use crossterm::Command;

/// Terminal colors: the ANSI 16-color palette plus 24-bit truecolor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    /// 24-bit color from `#rrggbb` or `rgb(r,g,b)`
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a color specification: a named token, `#rrggbb`, or `rgb(r,g,b)`
    pub fn parse(spec: &str) -> Option<Self> {
        if let Some(color) = Self::from_name(spec) {
            return Some(color);
        }
        if let Some(hex) = spec.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(inner) = spec
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_triple(inner);
        }
        None
    }

    /// Look up one of the 16 named colors
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "black" => Some(Color::Black),
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "blue" => Some(Color::Blue),
            "magenta" => Some(Color::Magenta),
            "cyan" => Some(Color::Cyan),
            "white" => Some(Color::White),
            "brightBlack" => Some(Color::BrightBlack),
            "brightRed" => Some(Color::BrightRed),
            "brightGreen" => Some(Color::BrightGreen),
            "brightYellow" => Some(Color::BrightYellow),
            "brightBlue" => Some(Color::BrightBlue),
            "brightMagenta" => Some(Color::BrightMagenta),
            "brightCyan" => Some(Color::BrightCyan),
            "brightWhite" => Some(Color::BrightWhite),
            _ => None,
        }
    }

    /// SGR parameter string for this color as a foreground
    pub fn sgr_code(&self) -> String {
        let code = match self {
            Color::Black => 30,
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
            Color::Cyan => 36,
            Color::White => 37,
            Color::BrightBlack => 90,
            Color::BrightRed => 91,
            Color::BrightGreen => 92,
            Color::BrightYellow => 93,
            Color::BrightBlue => 94,
            Color::BrightMagenta => 95,
            Color::BrightCyan => 96,
            Color::BrightWhite => 97,
            Color::Rgb(r, g, b) => return format!("38;2;{};{};{}", r, g, b),
        };
        code.to_string()
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn parse_rgb_triple(inner: &str) -> Option<Color> {
    let mut parts = inner.split(',').map(|p| p.trim().parse::<u8>());
    let r = parts.next()?.ok()?;
    let g = parts.next()?.ok()?;
    let b = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Color::Rgb(r, g, b))
}

/// A contiguous piece of rendered output
///
/// Concatenating the `text` of every segment produced for a line yields the
/// line itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'t> {
    /// Slice of the input text
    pub text: &'t str,
    /// Color to wrap the text in, `None` for plain
    pub color: Option<Color>,
}

impl<'t> Segment<'t> {
    /// Create a segment
    pub fn new(text: &'t str, color: Option<Color>) -> Self {
        Self { text, color }
    }

    /// Create an uncolored segment
    pub fn plain(text: &'t str) -> Self {
        Self { text, color: None }
    }
}

impl fmt::Display for Segment<'_> {
    /// Writes the text, wrapped in `ESC[<code>m ... ESC[0m` when colored
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.color {
            Some(color) => {
                write!(f, "\x1b[{}m{}", color.sgr_code(), self.text)?;
                SetAttribute(Attribute::Reset).write_ansi(f)
            }
            None => f.write_str(self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!(Color::parse("red"), Some(Color::Red));
        assert_eq!(Color::parse("brightCyan"), Some(Color::BrightCyan));
        assert_eq!(Color::Red.sgr_code(), "31");
        assert_eq!(Color::BrightWhite.sgr_code(), "97");
        // Names are case-sensitive
        assert_eq!(Color::parse("Red"), None);
        assert_eq!(Color::parse("bright_red"), None);
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(Color::parse("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(Color::parse("#FFfF00"), Some(Color::Rgb(255, 255, 0)));
        assert_eq!(Color::Rgb(255, 128, 0).sgr_code(), "38;2;255;128;0");
        assert_eq!(Color::parse("#fff"), None);
        assert_eq!(Color::parse("#gg0000"), None);
        assert_eq!(Color::parse("#ff00ç"), None);
    }

    #[test]
    fn test_rgb_colors() {
        assert_eq!(Color::parse("rgb(1,2,3)"), Some(Color::Rgb(1, 2, 3)));
        assert_eq!(Color::parse("rgb( 10, 20 ,30 )"), Some(Color::Rgb(10, 20, 30)));
        assert_eq!(Color::parse("rgb(256,0,0)"), None);
        assert_eq!(Color::parse("rgb(1,2)"), None);
        assert_eq!(Color::parse("rgb(1,2,3,4)"), None);
        assert_eq!(Color::parse("rgb(1,2,3"), None);
    }

    #[test]
    fn test_segment_display() {
        assert_eq!(Segment::plain("abc").to_string(), "abc");
        assert_eq!(Segment::new("abc", Some(Color::Red)).to_string(), "\x1b[31mabc\x1b[0m");
        assert_eq!(
            Segment::new("x", Some(Color::Rgb(1, 2, 3))).to_string(),
            "\x1b[38;2;1;2;3mx\x1b[0m"
        );
    }
}
