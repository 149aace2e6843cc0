//! Renderable logging arguments.
//!
//! A logging call takes a list of [`Arg`] values. Each variant has a fixed
//! textual form; the list renders as the pieces joined with single spaces.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// One renderable argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// An error's message text.
    Error(String),
    /// A structured value, rendered as compact JSON with ordered keys.
    Structured(Value),
    /// Any other value, rendered as its natural textual form.
    Scalar(String),
}

impl Arg {
    /// Argument carrying an error's message text.
    pub fn error(err: &(dyn std::error::Error + 'static)) -> Self {
        Self::Error(err.to_string())
    }

    /// Argument carrying a serializable value.
    ///
    /// A value that cannot be serialized degrades to its error message;
    /// building an argument never fails.
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => Self::Structured(v),
            Err(e) => Self::Scalar(e.to_string()),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(text) | Self::Scalar(text) => f.write_str(text),
            Self::Structured(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Self::Scalar(v.to_string())
    }
}

impl From<String> for Arg {
    fn from(v: String) -> Self {
        Self::Scalar(v)
    }
}

impl From<&String> for Arg {
    fn from(v: &String) -> Self {
        Self::Scalar(v.clone())
    }
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        Self::Structured(v)
    }
}

macro_rules! scalar_from {
    ($($t:ty),* $(,)?) => {
        $(impl From<$t> for Arg {
            fn from(v: $t) -> Self {
                Self::Scalar(v.to_string())
            }
        })*
    };
}

scalar_from!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

/// Join rendered arguments with single spaces.
pub(crate) fn join(args: &[Arg]) -> String {
    use fmt::Write;

    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{arg}");
    }
    out
}

/// Build a fixed-size array of [`Arg`]s, converting each element through
/// [`Arg::from`].
///
/// ```rust
/// use taglog::{Arg, args};
///
/// let list = args!["restarting", 3];
/// assert_eq!(list[0], Arg::Scalar("restarting".into()));
/// assert_eq!(list[1], Arg::Scalar("3".into()));
/// ```
#[macro_export]
macro_rules! args {
    ($($a:expr),* $(,)?) => {
        [$($crate::Arg::from($a)),*]
    };
}
