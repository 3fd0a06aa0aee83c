//! Reader and writer for literal-style nested data.
//!
//! The format covers `None`, `True`/`False`, integers, floats, quoted strings,
//! `[lists]`, `(tuples,)`, and `{dicts: ...}`, nested arbitrarily.

use std::fmt::{Display, Write};

use error::{location, Error, Result};
use serde::{Deserialize, Serialize};

pub mod error;
pub mod parser;

/// A parsed literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Literal>),
    Tuple(Vec<Literal>),
    /// Key-value pairs in source order.
    Dict(Vec<(Literal, Literal)>),
}

/// Parse the given literal text.
pub fn parse<T>(input: &T) -> Result<Literal>
where
    T: AsRef<str> + ?Sized,
{
    let input = input.as_ref();
    match parser::parse_literal(input) {
        Ok((rest, lit)) if rest.is_empty() => Ok(lit),
        Ok((rest, _)) => {
            let (line, column) = location(input, input.len() - rest.len());
            Err(Error::TrailingInput { line, column })
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            let (line, column) = location(input, input.len() - e.input.len());
            Err(Error::Parse { line, column })
        }
        Err(nom::Err::Incomplete(_)) => {
            let (line, column) = location(input, input.len());
            Err(Error::Parse { line, column })
        }
    }
}

impl Literal {
    /// Returns the string contents if this is a [`Literal::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }
}

fn write_float(f: &mut std::fmt::Formatter<'_>, x: f64) -> std::fmt::Result {
    if x.is_nan() {
        write!(f, "nan")
    } else if x.is_infinite() {
        write!(f, "{}", if x > 0. { "inf" } else { "-inf" })
    } else {
        // Debug formatting always keeps a fractional part or exponent.
        write!(f, "{x:?}")
    }
}

fn write_str(f: &mut std::fmt::Formatter<'_>, s: &str) -> std::fmt::Result {
    f.write_char('\'')?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\'' => f.write_str("\\'")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('\'')
}

fn write_seq(f: &mut std::fmt::Formatter<'_>, items: &[Literal]) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::None => f.write_str("None"),
            Literal::Bool(true) => f.write_str("True"),
            Literal::Bool(false) => f.write_str("False"),
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Float(x) => write_float(f, *x),
            Literal::Str(s) => write_str(f, s),
            Literal::List(items) => {
                f.write_char('[')?;
                write_seq(f, items)?;
                f.write_char(']')
            }
            Literal::Tuple(items) => {
                f.write_char('(')?;
                write_seq(f, items)?;
                if items.len() == 1 {
                    f.write_char(',')?;
                }
                f.write_char(')')
            }
            Literal::Dict(pairs) => {
                f.write_char('{')?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_char('}')
            }
        }
    }
}
