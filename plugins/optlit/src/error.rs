use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid literal syntax at line {line}, column {column}")]
    Parse { line: usize, column: usize },
    #[error("unexpected trailing input at line {line}, column {column}")]
    TrailingInput { line: usize, column: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Converts a byte offset into `input` to a 1-based line and column.
pub(crate) fn location(input: &str, offset: usize) -> (usize, usize) {
    let consumed = &input[..offset.min(input.len())];
    let line = consumed.matches('\n').count() + 1;
    let column = match consumed.rfind('\n') {
        Some(pos) => consumed[pos + 1..].chars().count() + 1,
        None => consumed.chars().count() + 1,
    };
    (line, column)
}
