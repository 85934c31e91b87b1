mod arbitrary;
mod property_partition;
mod serde_compat;

use alloc::vec::Vec;

use crate::{ParseError, ParserOptions, PushParser, Status, Value};

/// Feeds `text` byte by byte and records every status until the first error.
fn statuses_with(text: &[u8], options: ParserOptions) -> (Vec<Status>, Option<ParseError>) {
    let mut parser = PushParser::with_options(options);
    let mut statuses = Vec::new();
    for &byte in text {
        match parser.put_byte(byte) {
            Ok(status) => statuses.push(status),
            Err(err) => return (statuses, Some(err)),
        }
    }
    (statuses, None)
}

/// Parses `text` byte by byte, asserting that `Complete` is reported once,
/// for the last byte.
fn parse_bytewise(text: &str) -> Value {
    parse_bytewise_with(text, ParserOptions::default())
}

fn parse_bytewise_with(text: &str, options: ParserOptions) -> Value {
    let mut parser = PushParser::with_options(options);
    let bytes = text.as_bytes();
    for (i, &byte) in bytes.iter().enumerate() {
        let status = parser
            .put_byte(byte)
            .unwrap_or_else(|err| panic!("{text:?}: {err}"));
        let expected = if i + 1 == bytes.len() {
            Status::Complete
        } else {
            Status::Continue
        };
        assert_eq!(status, expected, "{text:?} at byte {i}");
    }
    parser.into_value().expect("complete value")
}

/// Feeds `text` until it fails and returns the error.
fn parse_err(text: &str) -> ParseError {
    parse_err_with(text, ParserOptions::default())
}

fn parse_err_with(text: &str, options: ParserOptions) -> ParseError {
    match statuses_with(text.as_bytes(), options) {
        (_, Some(err)) => err,
        (statuses, None) => panic!("{text:?} did not fail: {statuses:?}"),
    }
}
