use std::str;

use nom::branch::alt;
use nom::bytes::complete::{escaped_transform, is_not, tag};
use nom::character::complete::{char, multispace0};
use nom::combinator::{map, opt, value};
use nom::multi::separated_list0;
use nom::number::complete::recognize_float;
use nom::sequence::{delimited, pair, preceded, separated_pair, terminated};
use nom::IResult;

use crate::Literal;

#[cfg(test)]
mod tests;

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn none_lit(input: &str) -> IResult<&str, Literal> {
    value(Literal::None, tag("None"))(input)
}

fn bool_lit(input: &str) -> IResult<&str, Literal> {
    alt((
        value(Literal::Bool(true), tag("True")),
        value(Literal::Bool(false), tag("False")),
    ))(input)
}

fn special_float(input: &str) -> IResult<&str, Literal> {
    alt((
        value(Literal::Float(f64::NEG_INFINITY), tag("-inf")),
        value(Literal::Float(f64::INFINITY), tag("inf")),
        value(Literal::Float(f64::NAN), tag("nan")),
    ))(input)
}

fn number_lit(input: &str) -> IResult<&str, Literal> {
    let (rest, text) = recognize_float(input)?;
    let is_float = text.contains(|c| matches!(c, '.' | 'e' | 'E'));
    if !is_float {
        if let Ok(i) = text.parse::<i64>() {
            return Ok((rest, Literal::Int(i)));
        }
    }
    match text.parse::<f64>() {
        Ok(x) => Ok((rest, Literal::Float(x))),
        Err(_) => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Float,
        ))),
    }
}

fn escape(input: &str) -> IResult<&str, &str> {
    alt((
        value("\\", tag("\\")),
        value("'", tag("'")),
        value("\"", tag("\"")),
        value("\n", tag("n")),
        value("\t", tag("t")),
        value("\r", tag("r")),
    ))(input)
}

fn single_quoted(input: &str) -> IResult<&str, String> {
    delimited(
        char('\''),
        map(
            opt(escaped_transform(is_not("\\'"), '\\', escape)),
            Option::unwrap_or_default,
        ),
        char('\''),
    )(input)
}

fn double_quoted(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        map(
            opt(escaped_transform(is_not("\\\""), '\\', escape)),
            Option::unwrap_or_default,
        ),
        char('"'),
    )(input)
}

fn str_lit(input: &str) -> IResult<&str, Literal> {
    map(alt((single_quoted, double_quoted)), Literal::Str)(input)
}

/// Comma-separated items, allowing a trailing comma.
///
/// Returns whether a trailing comma was present.
fn items<'a, O, F>(item: F) -> impl FnMut(&'a str) -> IResult<&'a str, (Vec<O>, bool)>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    pair(
        separated_list0(ws(char(',')), item),
        map(opt(ws(char(','))), |c| c.is_some()),
    )
}

fn list_lit(input: &str) -> IResult<&str, Literal> {
    map(
        delimited(ws(char('[')), items(literal), char(']')),
        |(items, _)| Literal::List(items),
    )(input)
}

fn tuple_lit(input: &str) -> IResult<&str, Literal> {
    map(
        delimited(ws(char('(')), items(literal), char(')')),
        |(mut items, trailing)| {
            // `(x)` is just a parenthesized value.
            if items.len() == 1 && !trailing {
                items.remove(0)
            } else {
                Literal::Tuple(items)
            }
        },
    )(input)
}

fn dict_lit(input: &str) -> IResult<&str, Literal> {
    map(
        delimited(
            ws(char('{')),
            items(separated_pair(literal, char(':'), literal)),
            char('}'),
        ),
        |(pairs, _)| Literal::Dict(pairs),
    )(input)
}

/// Parses one literal, with surrounding whitespace.
pub fn literal(input: &str) -> IResult<&str, Literal> {
    ws(alt((
        none_lit,
        bool_lit,
        special_float,
        number_lit,
        str_lit,
        list_lit,
        tuple_lit,
        dict_lit,
    )))(input)
}

pub(crate) fn parse_literal(input: &str) -> IResult<&str, Literal> {
    terminated(preceded(multispace0, literal), multispace0)(input)
}
