//! Message template parsing and rendering.
//!
//! A template is parsed once into a flat segment list and rendered once per
//! logging call, producing the styled and the plain string together. The two
//! stay synchronized by construction: stripping the escape sequences from
//! the styled string yields exactly the plain string.
//!
//! ## Placeholders
//!
//! - `{date(<pattern>)}` — call timestamp, see [`DatePattern`](crate::datefmt::DatePattern)
//! - `{stack(<subtemplate>)}` — call site; tokens `addr`, `row`, `col`, `trigger`
//! - `{level}` — upper-cased level name
//! - `{tag}` — space-joined tag chain
//! - `{content}` — space-joined arguments
//!
//! Placeholder names match case-insensitively. Malformed or unknown
//! placeholder text stays literal; parenthesized patterns run to the first
//! `)}`. Because substituted text is never re-scanned, placeholder-like text
//! inside user content stays literal.

use bashstyle::{Color, Font, style};
use chrono::NaiveDateTime;

use crate::datefmt::DatePattern;
use crate::level::Level;
use crate::stack::StackInfo;

/// The field bag rendered into a template.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    /// Capture time of the call.
    pub timestamp: NaiveDateTime,
    pub level: Level,
    /// Space-joined tag chain.
    pub tag: &'a str,
    /// Space-joined stringified arguments.
    pub content: &'a str,
    pub stack: &'a StackInfo,
}

/// The two synchronized renderings of one logging call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    /// ANSI-styled line for interactive display.
    pub styled: String,
    /// The same line without any escape sequences.
    pub plain: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StackSeg {
    Literal(String),
    Addr,
    Row,
    Col,
    Trigger,
}

/// A parsed `{stack(...)}` sub-template.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StackTemplate {
    segs: Vec<StackSeg>,
}

impl StackTemplate {
    fn parse(sub: &str) -> Self {
        const TOKENS: [(&str, StackSeg); 4] = [
            ("trigger", StackSeg::Trigger),
            ("addr", StackSeg::Addr),
            ("row", StackSeg::Row),
            ("col", StackSeg::Col),
        ];

        let mut segs = Vec::new();
        let mut literal = String::new();
        let mut rest = sub;

        'scan: while !rest.is_empty() {
            for (token, seg) in &TOKENS {
                if starts_with_ci(rest, token) {
                    if !literal.is_empty() {
                        segs.push(StackSeg::Literal(std::mem::take(&mut literal)));
                    }
                    segs.push(seg.clone());
                    rest = &rest[token.len()..];
                    continue 'scan;
                }
            }
            let c = rest.chars().next().unwrap_or_default();
            literal.push(c);
            rest = &rest[c.len_utf8()..];
        }
        if !literal.is_empty() {
            segs.push(StackSeg::Literal(literal));
        }

        Self { segs }
    }

    fn resolve(&self, stack: &StackInfo) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        for seg in &self.segs {
            match seg {
                StackSeg::Literal(text) => out.push_str(text),
                StackSeg::Addr => out.push_str(&stack.addr),
                StackSeg::Row => {
                    let _ = write!(out, "{}", stack.row);
                }
                StackSeg::Col => {
                    let _ = write!(out, "{}", stack.col);
                }
                StackSeg::Trigger => out.push_str(&stack.trigger),
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Date(DatePattern),
    Stack(StackTemplate),
    Level,
    Tag,
    Content,
}

/// A parsed message template.
///
/// Parsing happens once per logger; rendering walks the segment list in one
/// left-to-right pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
    has_date: bool,
}

impl Template {
    /// Parse `input`. Parsing is total: malformed placeholders degrade to
    /// literal text.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = input;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let candidate = &rest[open..];
            if let Some((segment, consumed)) = match_placeholder(candidate) {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(segment);
                rest = &candidate[consumed..];
            } else {
                literal.push('{');
                rest = &candidate[1..];
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        let has_date = segments.iter().any(|s| matches!(s, Segment::Date(_)));
        Self { segments, has_date }
    }

    /// Whether the template contains a `{date(...)}` placeholder.
    #[must_use]
    pub fn has_date(&self) -> bool {
        self.has_date
    }

    /// Render `record` into the styled and the plain string.
    ///
    /// When `call_detail` is off, `{stack(...)}` renders as the empty string
    /// on both sides. When the template contains a date placeholder, the
    /// whole styled line is additionally wrapped in cyan + bold.
    #[must_use]
    pub fn render(&self, record: &Record<'_>, call_detail: bool) -> Rendering {
        let mut styled = String::new();
        let mut plain = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => {
                    styled.push_str(text);
                    plain.push_str(text);
                }
                Segment::Date(pattern) => {
                    let text = pattern.format(&record.timestamp);
                    styled.push_str(&text);
                    plain.push_str(&text);
                }
                Segment::Level => {
                    let name = record.level.upper();
                    styled.push_str(&style(name, &[record.level.color().into()]));
                    plain.push_str(name);
                }
                Segment::Tag => {
                    styled.push_str(&style(record.tag, &[Color::Cyan.into()]));
                    plain.push_str(record.tag);
                }
                Segment::Content => {
                    styled.push_str(&style(record.content, &[Color::Green.into()]));
                    plain.push_str(record.content);
                }
                Segment::Stack(sub) => {
                    if call_detail {
                        let frag = format!("({})", sub.resolve(record.stack));
                        styled.push_str(&style(&frag, &[Color::Blue.into(), Font::Underline.into()]));
                        plain.push_str(&frag);
                    }
                }
            }
        }

        if self.has_date {
            styled = style(&styled, &[Color::Cyan.into(), Font::Bold.into()]);
        }

        Rendering { styled, plain }
    }

    /// Render `record` as a path fragment.
    ///
    /// Path fields differ from line fields: `{level}` is lower-cased,
    /// `{content}` and `{stack(...)}` resolve to nothing, and no styling is
    /// ever applied.
    #[must_use]
    pub fn render_path(&self, record: &Record<'_>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Date(pattern) => pattern.render(&record.timestamp, &mut out),
                Segment::Level => out.push_str(record.level.as_str()),
                Segment::Tag => out.push_str(record.tag),
                Segment::Content | Segment::Stack(_) => {}
            }
        }
        out
    }
}

/// Case-insensitive ASCII prefix test.
fn starts_with_ci(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Try to match a placeholder at `s`, which starts at an opening brace.
/// Returns the segment and the number of bytes consumed.
fn match_placeholder(s: &str) -> Option<(Segment, usize)> {
    let body = &s[1..];

    for (name, segment) in [
        ("level}", Segment::Level),
        ("tag}", Segment::Tag),
        ("content}", Segment::Content),
    ] {
        if starts_with_ci(body, name) {
            return Some((segment, 1 + name.len()));
        }
    }

    if starts_with_ci(body, "date(") {
        let inner = &body["date(".len()..];
        let close = inner.find(")}")?;
        let pattern = DatePattern::parse(&inner[..close]);
        return Some((Segment::Date(pattern), 1 + "date(".len() + close + 2));
    }

    if starts_with_ci(body, "stack(") {
        let inner = &body["stack(".len()..];
        let close = inner.find(")}")?;
        let sub = StackTemplate::parse(&inner[..close]);
        return Some((Segment::Stack(sub), 1 + "stack(".len() + close + 2));
    }

    None
}
