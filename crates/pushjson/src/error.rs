use thiserror::Error;

/// A parse failure, with the position of the offending byte.
///
/// Positions are counted over the whole stream fed to a parser: `offset` is
/// the 0-based byte index, `line` and `column` are 1-based (columns count
/// bytes).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{source} at {line}:{column}")]
pub struct ParseError {
    pub(crate) source: SyntaxError,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    /// Numeric status code of an error, next to [`Status::code`](crate::Status::code).
    pub const CODE: i32 = -1;

    /// What went wrong.
    #[must_use]
    pub fn syntax_error(&self) -> &SyntaxError {
        &self.source
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unexpected byte '{}', expected {expected}", .byte.escape_ascii())]
    UnexpectedByte { byte: u8, expected: &'static str },
    #[error("invalid escape sequence '\\{}'", .0.escape_ascii())]
    InvalidEscape(u8),
    #[error("invalid number literal")]
    InvalidNumber,
    #[error("invalid literal, unexpected byte '{}'", .byte.escape_ascii())]
    InvalidLiteral { byte: u8 },
    #[error("nesting depth exceeds the limit of {0}")]
    DepthLimitExceeded(usize),
    #[error("unexpected byte '{}' after the end of the value", .0.escape_ascii())]
    TrailingCharacter(u8),
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}
