//! Push-style JSON parser.
//!
//! Overview
//! - The caller pushes input into [`PushParser::put_byte`] (or
//!   [`PushParser::put_buffer`]) as it arrives. Nothing is read ahead and no
//!   complete document ever needs to be in memory.
//! - Every JSON value being parsed has its own context ([`frame::Frame`]): a
//!   small state machine owning the value under construction and the bytes of
//!   the token being lexed.
//! - Nested values are parsed by child contexts. Instead of recursing on the
//!   call stack, the parser keeps the chain of active contexts as an explicit
//!   stack: the context at index `i + 1` is the child of the one at `i`, and
//!   the parent of a context is simply the previous index. Each byte goes to
//!   the deepest context.
//!
//! Completion and re-dispatch
//! - When a child finishes, its value is moved into the parent's tree and the
//!   child is popped. Containers and strings consume their closing byte.
//!   Numbers have no closing byte and finish on a delimiter (`,`, `}`, `]`)
//!   that belongs to the parent, so that byte is fed to the parent right away.
//!
//! Errors
//! - Any error is final. The partial tree is dropped, and every further byte
//!   returns the same [`ParseError`].

mod accumulator;
mod frame;
mod literal;

use alloc::vec::Vec;

use frame::{Frame, Spawn, State, Step, is_whitespace};

use crate::{Kind, ParseError, ParserOptions, SyntaxError, Value};

/// Outcome of feeding input that did not fail.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The root value is not finished yet.
    Continue,
    /// The byte just fed finished the root value.
    Complete,
}

impl Status {
    /// Numeric form of the status: `0` for [`Continue`](Status::Continue), `1`
    /// for [`Complete`](Status::Complete). Errors are
    /// [`ParseError::CODE`].
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Status::Continue => 0,
            Status::Complete => 1,
        }
    }
}

/// Location of the next byte in the input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Bytes consumed so far.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in bytes.
    pub column: usize,
}

impl Position {
    const fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn advance(&mut self, byte: u8) {
        self.offset += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

#[derive(Debug)]
enum Outcome {
    Parsing,
    Complete(Value),
    Failed(ParseError),
}

/// An incremental JSON parser fed one byte or one buffer at a time.
///
/// # Examples
///
/// ```
/// use pushjson::{PushParser, Status};
///
/// let mut parser = PushParser::new();
/// assert_eq!(parser.put_buffer(br#"{"a": [1, 2"#), Ok(Status::Continue));
/// assert_eq!(parser.put_buffer(br#", 3]}"#), Ok(Status::Complete));
///
/// let value = parser.into_value().unwrap();
/// assert_eq!(value.to_string(), r#"{"a":[1,2,3]}"#);
/// ```
#[derive(Debug)]
pub struct PushParser {
    /// Context of the document's top-level value.
    root: Frame,
    /// Active descendants of `root`, outermost first.
    children: Vec<Frame>,
    outcome: Outcome,
    options: ParserOptions,
    position: Position,
}

impl Default for PushParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PushParser {
    /// Creates a parser with default [`ParserOptions`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    #[must_use]
    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            root: Frame::new(),
            children: Vec::new(),
            outcome: Outcome::Parsing,
            options,
            position: Position::start(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Feeds one byte.
    ///
    /// Returns [`Status::Complete`] exactly once, for the byte that finishes
    /// the root value. A byte fed after that is a
    /// [`SyntaxError::TrailingCharacter`].
    ///
    /// A root number is finished by the `,`, `}` or `]` that follows it. That
    /// delimiter is not part of the document: it is reported as `Complete`
    /// but the [`position`](Self::position) does not move past it.
    ///
    /// # Errors
    ///
    /// Returns the syntax error caused by `byte`. The parser is then poisoned:
    /// every later call returns the same error.
    pub fn put_byte(&mut self, byte: u8) -> Result<Status, ParseError> {
        if let Outcome::Failed(err) = &self.outcome {
            return Err(err.clone());
        }
        if self.is_complete() {
            return Err(self.fail(SyntaxError::TrailingCharacter(byte)));
        }

        match self.drive(byte) {
            Ok((status, consumed)) => {
                if consumed {
                    self.position.advance(byte);
                }
                Ok(status)
            }
            Err(source) => Err(self.fail(source)),
        }
    }

    /// Feeds `bytes` one at a time, stopping at the first result that is not
    /// [`Status::Continue`].
    ///
    /// Bytes after the one that completed the value are not consumed, nor is
    /// the delimiter that finished a root number. Callers that need them must
    /// track how much they fed: the value's end is at
    /// [`position`](Self::position).
    ///
    /// # Errors
    ///
    /// See [`put_byte`](Self::put_byte).
    pub fn put_buffer(&mut self, bytes: impl AsRef<[u8]>) -> Result<Status, ParseError> {
        for &byte in bytes.as_ref() {
            if self.put_byte(byte)? == Status::Complete {
                return Ok(Status::Complete);
            }
        }
        Ok(Status::Continue)
    }

    /// Signals the end of input and returns the root value.
    ///
    /// A root number has no closing delimiter and is finished here, so a bare
    /// `3.14` document can be parsed.
    ///
    /// # Errors
    ///
    /// [`SyntaxError::UnexpectedEndOfInput`] if the value is incomplete, or
    /// the error that poisoned the parser.
    pub fn finish(mut self) -> Result<Value, ParseError> {
        match core::mem::replace(&mut self.outcome, Outcome::Parsing) {
            Outcome::Complete(value) => Ok(value),
            Outcome::Failed(err) => Err(err),
            Outcome::Parsing => {
                if self.children.is_empty() && self.root.state() == State::Number {
                    match self.root.finish_number() {
                        Ok(value) => {
                            tracing::debug!(
                                offset = self.position.offset,
                                "root number finished at end of input"
                            );
                            return Ok(value);
                        }
                        Err(source) => return Err(self.fail(source)),
                    }
                }
                Err(self.fail(SyntaxError::UnexpectedEndOfInput))
            }
        }
    }

    /// The root value, once complete.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Complete(value) => Some(value),
            _ => None,
        }
    }

    /// Consumes the parser, returning the root value if it is complete.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self.outcome {
            Outcome::Complete(value) => Some(value),
            _ => None,
        }
    }

    /// Moves the completed root value out and starts over with a fresh
    /// context, so a stream of consecutive documents can be parsed by one
    /// parser. The position keeps counting across documents.
    ///
    /// Returns `None` (and changes nothing) while the value is incomplete.
    pub fn take_value(&mut self) -> Option<Value> {
        if !self.is_complete() {
            return None;
        }
        match core::mem::replace(&mut self.outcome, Outcome::Parsing) {
            Outcome::Complete(value) => {
                self.root = Frame::new();
                Some(value)
            }
            other => {
                self.outcome = other;
                None
            }
        }
    }

    /// Discards all state, including errors and the input position.
    pub fn reset(&mut self) {
        *self = Self::with_options(self.options);
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.outcome, Outcome::Complete(_))
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }

    /// The error that poisoned the parser.
    #[must_use]
    pub fn error(&self) -> Option<&ParseError> {
        match &self.outcome {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Kind of the root value, [`Kind::Unknown`] until its first byte.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match &self.outcome {
            Outcome::Complete(value) => value.kind(),
            _ => self.root.kind(),
        }
    }

    /// Number of active child contexts below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.children.len()
    }

    /// Position of the next byte.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Deepest active context.
    fn top(&mut self) -> &mut Frame {
        self.children.last_mut().unwrap_or(&mut self.root)
    }

    /// Feeds `byte` down the stack. The flag is `false` only when the byte
    /// delimited a root number and is left to whatever follows the document.
    fn drive(&mut self, byte: u8) -> Result<(Status, bool), SyntaxError> {
        let options = self.options;
        loop {
            let depth = self.children.len();
            #[cfg(any(test, feature = "fuzzing"))]
            assert!(
                depth <= options.max_depth,
                "Internal error: context stack deeper than the nesting limit"
            );
            match self.top().put_byte(byte, depth, &options)? {
                Step::Continue => return Ok((Status::Continue, true)),
                Step::Spawn(Spawn::Key) => {
                    self.children.push(Frame::key());
                    return Ok((Status::Continue, true));
                }
                Step::Spawn(Spawn::Element) => {
                    // The byte starts the child's value: feed it again.
                    self.children.push(Frame::new());
                }
                Step::Complete { value, consumed } => {
                    let Some(child) = self.children.pop() else {
                        tracing::debug!(
                            kind = ?value.kind(),
                            offset = self.position.offset,
                            "document complete"
                        );
                        self.root = Frame::new();
                        self.outcome = Outcome::Complete(value);
                        return Ok((Status::Complete, consumed));
                    };
                    tracing::trace!(depth, kind = ?child.kind(), "value complete");
                    drop(child);

                    self.top().attach(value);
                    if consumed {
                        return Ok((Status::Continue, true));
                    }
                    tracing::trace!(byte, depth = depth - 1, "delimiter re-dispatched to parent");
                }
            }
        }
    }

    /// Poisons the parser with `source` at the current position.
    fn fail(&mut self, source: SyntaxError) -> ParseError {
        let err = ParseError {
            source,
            offset: self.position.offset,
            line: self.position.line,
            column: self.position.column,
        };
        if let SyntaxError::DepthLimitExceeded(limit) = source {
            tracing::warn!(limit, offset = err.offset, "nesting depth limit reached");
        } else {
            tracing::debug!(error = %err, depth = self.children.len(), "parse failed");
        }
        self.children.clear();
        self.root = Frame::new();
        self.outcome = Outcome::Failed(err.clone());
        err
    }

    /// Accepts whitespace after a completed value; anything else is a
    /// trailing character.
    pub(crate) fn put_trailing(&mut self, byte: u8) -> Result<(), ParseError> {
        if self.is_complete() && is_whitespace(byte) {
            self.position.advance(byte);
            return Ok(());
        }
        self.put_byte(byte).map(|_| ())
    }
}

/// Parses a complete document held in memory.
///
/// Whitespace may follow the value; any other trailing byte is an error. A
/// bare number at the root is finished by the end of the input.
///
/// # Errors
///
/// The first syntax error, or [`SyntaxError::UnexpectedEndOfInput`].
pub fn parse_slice_with(
    bytes: impl AsRef<[u8]>,
    options: ParserOptions,
) -> Result<Value, ParseError> {
    let bytes = bytes.as_ref();
    let mut parser = PushParser::with_options(options);
    // The offset only stays put for the delimiter of a root number, which is
    // then looked at again as a trailing byte.
    while let Some(&byte) = bytes.get(parser.position().offset) {
        if parser.is_complete() {
            parser.put_trailing(byte)?;
        } else {
            let _ = parser.put_byte(byte)?;
        }
    }
    parser.finish()
}

/// [`parse_slice_with`] with default options.
///
/// # Errors
///
/// See [`parse_slice_with`].
pub fn parse_slice(bytes: impl AsRef<[u8]>) -> Result<Value, ParseError> {
    parse_slice_with(bytes, ParserOptions::default())
}

/// [`parse_slice`] for text.
///
/// # Errors
///
/// See [`parse_slice_with`].
pub fn parse_str(text: &str) -> Result<Value, ParseError> {
    parse_slice(text)
}
