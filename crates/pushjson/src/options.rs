/// Default for [`ParserOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for [`PushParser`](crate::PushParser).
///
/// # Examples
///
/// ```rust
/// use pushjson::{ParserOptions, PushParser, Status};
///
/// let mut parser = PushParser::with_options(ParserOptions {
///     allow_leading_whitespace: true,
///     ..Default::default()
/// });
/// assert_eq!(parser.put_buffer(b"\n  [true]"), Ok(Status::Complete));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum number of nested objects and arrays.
    ///
    /// Opening a container deeper than this fails with
    /// [`SyntaxError::DepthLimitExceeded`](crate::SyntaxError::DepthLimitExceeded).
    /// The in-flight memory of a parser is proportional to this depth.
    ///
    /// Parsing itself never recurses, but dropping, displaying and
    /// serializing a [`Value`](crate::Value) recurse once per nesting level.
    /// This limit is what keeps those operations within the caller's stack,
    /// so raise it only as far as the thread that owns the values can recurse.
    ///
    /// # Default
    ///
    /// `128`
    pub max_depth: usize,

    /// Whether to skip whitespace before the root value.
    ///
    /// Whitespace between tokens is always accepted; this only concerns the
    /// bytes before the first byte of the document.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_leading_whitespace: bool,

    /// Whether to accept any four bytes starting with `n` as `null`.
    ///
    /// By default the literal must spell `null` exactly.
    ///
    /// # Default
    ///
    /// `false`
    pub lenient_null: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_leading_whitespace: false,
            lenient_null: false,
        }
    }
}
