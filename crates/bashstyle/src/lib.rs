#![forbid(unsafe_code)]
// Allow these clippy lints for API ergonomics
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::use_self)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]

//! # Bashstyle
//!
//! ANSI escape styling primitives for terminal output.
//!
//! Bashstyle provides:
//! - **Tokens**: a fixed palette of [`Color`]s and [`Font`] effects with
//!   their SGR codes
//! - **[`style`]**: wrap text in a single escape prefix and a reset suffix
//! - **[`strip`]**: remove every escape sequence, recovering the plain text
//! - **[`visible_width`]**: display-cell width with escapes ignored
//!
//! ## Example
//!
//! ```rust
//! use bashstyle::{style, strip, Color, Font};
//!
//! let styled = style("ready", &[Color::Green.into(), Font::Bold.into()]);
//! assert_eq!(styled, "\x1b[92;1mready\x1b[0m");
//! assert_eq!(strip(&styled), "ready");
//! ```
//!
//! Styling composes by plain string concatenation: [`style`] never inspects
//! the text it wraps, so already-styled fragments can be embedded in a
//! larger styled line and [`strip`] still recovers the unstyled text.

use unicode_width::UnicodeWidthChar;

/// Escape sequence introducer shared by every styled run.
const CONTROL: &str = "\x1b[";

/// The reset sequence that terminates every styled run.
pub const RESET: &str = "\x1b[0m";

/// Foreground colors of the bright terminal palette (plus the primary blue).
///
/// Discriminants are the SGR codes emitted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    /// Standard blue, used as the primary accent.
    Primary = 34,
    /// Bright black.
    Gray = 90,
    Red = 91,
    Green = 92,
    Yellow = 93,
    Blue = 94,
    Magenta = 95,
    Cyan = 96,
}

impl Color {
    /// The SGR parameter for this color.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Font effects.
///
/// Discriminants are the SGR codes emitted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Font {
    Bold = 1,
    Dim = 2,
    Underline = 4,
    Blink = 5,
    Reverse = 7,
}

impl Font {
    /// The SGR parameter for this effect.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A single styling token: either a [`Color`] or a [`Font`] effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Color(Color),
    Font(Font),
}

impl Token {
    /// The SGR parameter for this token.
    pub fn code(self) -> u8 {
        match self {
            Self::Color(c) => c.code(),
            Self::Font(f) => f.code(),
        }
    }
}

impl From<Color> for Token {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}

impl From<Font> for Token {
    fn from(f: Font) -> Self {
        Self::Font(f)
    }
}

/// Wrap `text` in one escape prefix built from `tokens` and a reset suffix.
///
/// The prefix joins the token codes with `;`, so
/// `style("x", &[Color::Cyan.into(), Font::Bold.into()])` produces
/// `"\x1b[96;1mx\x1b[0m"`. An empty token slice still emits the
/// (empty-parameter) prefix.
///
/// # Example
///
/// ```rust
/// use bashstyle::{style, Color};
///
/// assert_eq!(style("err", &[Color::Red.into()]), "\x1b[91merr\x1b[0m");
/// ```
pub fn style(text: &str, tokens: &[Token]) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    out.push_str(CONTROL);
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        let mut code = token.code();
        // Codes are at most two digits.
        if code >= 10 {
            out.push(char::from(b'0' + code / 10));
            code %= 10;
        }
        out.push(char::from(b'0' + code));
    }
    out.push('m');
    out.push_str(text);
    out.push_str(RESET);
    out
}

/// Remove every escape-sequence run from `text`.
///
/// A run starts at the escape byte and ends at the terminating `m`; all
/// other characters pass through untouched. This is the exact inverse of
/// [`style`] for any input without escape bytes of its own, including
/// stacked runs from nested styling. An unterminated run at the end of the
/// input is dropped.
pub fn strip(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_escape = false;

    for c in text.chars() {
        if c == '\x1b' {
            in_escape = true;
            continue;
        }
        if in_escape {
            if c == 'm' {
                in_escape = false;
            }
            continue;
        }
        result.push(c);
    }

    result
}

/// Calculate the visible width of a string (excluding ANSI escapes).
///
/// Escape sequences (SGR/CSI, and OSC terminated by BEL or ST) contribute
/// nothing; remaining characters are measured in display cells, so CJK
/// characters count as two and combining characters as zero.
pub fn visible_width(s: &str) -> usize {
    let mut width = 0;
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        Normal,
        Esc,
        Csi,
        Osc,
    }
    let mut state = State::Normal;

    for c in s.chars() {
        match state {
            State::Normal => {
                if c == '\x1b' {
                    state = State::Esc;
                } else {
                    width += UnicodeWidthChar::width(c).unwrap_or(0);
                }
            }
            State::Esc => {
                if c == '[' {
                    state = State::Csi;
                } else if c == ']' {
                    state = State::Osc;
                } else {
                    // Simple escapes like \x1b7 (save cursor) are a single
                    // char after ESC.
                    state = State::Normal;
                }
            }
            State::Csi => {
                // CSI sequence: [params] [intermediate] final
                // Final byte is 0x40-0x7E (@ to ~)
                if ('@'..='~').contains(&c) {
                    state = State::Normal;
                }
            }
            State::Osc => {
                // OSC sequence: ] [params] ; [text] BEL/ST
                if c == '\x07' {
                    state = State::Normal;
                } else if c == '\x1b' {
                    state = State::Esc;
                }
            }
        }
    }

    width
}

/// Commonly used types and functions.
pub mod prelude {
    pub use crate::{Color, Font, Token, strip, style, visible_width};
}
