//! Date pattern parsing and formatting.
//!
//! Patterns mix literal text with the tokens `yyyy`, `mm`, `dd`, `hh`,
//! `min`, `ss`, `ms`. Tokens are matched longest-first at each position;
//! anything unrecognized passes through as literal text.

use std::fmt::Write;

use chrono::{Datelike, NaiveDateTime, Timelike};

#[derive(Debug, Clone, PartialEq, Eq)]
enum DateSeg {
    Literal(String),
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Milli,
}

/// Token table, longest first.
const TOKENS: [(&str, DateSeg); 7] = [
    ("yyyy", DateSeg::Year),
    ("min", DateSeg::Minute),
    ("mm", DateSeg::Month),
    ("dd", DateSeg::Day),
    ("hh", DateSeg::Hour),
    ("ss", DateSeg::Second),
    ("ms", DateSeg::Milli),
];

/// A parsed date pattern, reusable across renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    segs: Vec<DateSeg>,
}

impl DatePattern {
    /// Parse `pattern` into its token stream. Parsing is total.
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let mut segs = Vec::new();
        let mut literal = String::new();
        let mut rest = pattern;

        'scan: while !rest.is_empty() {
            for (token, seg) in &TOKENS {
                if rest.starts_with(token) {
                    if !literal.is_empty() {
                        segs.push(DateSeg::Literal(std::mem::take(&mut literal)));
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
            segs.push(DateSeg::Literal(literal));
        }

        Self { segs }
    }

    /// Render the pattern for `t` into `out`.
    pub fn render(&self, t: &NaiveDateTime, out: &mut String) {
        for seg in &self.segs {
            // Writes to a String never fail.
            match seg {
                DateSeg::Literal(text) => out.push_str(text),
                DateSeg::Year => {
                    let _ = write!(out, "{:04}", t.year());
                }
                DateSeg::Month => {
                    let _ = write!(out, "{:02}", t.month());
                }
                DateSeg::Day => {
                    let _ = write!(out, "{:02}", t.day());
                }
                DateSeg::Hour => {
                    let _ = write!(out, "{:02}", t.hour());
                }
                DateSeg::Minute => {
                    let _ = write!(out, "{:02}", t.minute());
                }
                DateSeg::Second => {
                    let _ = write!(out, "{:02}", t.second());
                }
                DateSeg::Milli => {
                    let _ = write!(out, "{:03}", t.nanosecond() / 1_000_000 % 1000);
                }
            }
        }
    }

    /// Render the pattern for `t` as a new string.
    #[must_use]
    pub fn format(&self, t: &NaiveDateTime) -> String {
        let mut out = String::new();
        self.render(t, &mut out);
        out
    }
}
