use alloc::{string::ToString, vec::Vec};

use quickcheck::QuickCheck;
use quickcheck_macros::quickcheck;

use super::chunk_helpers::split_at_seeds;
use crate::{PushParser, Status, Value};

/// Property: feeding the text of a value in arbitrary chunks yields the same
/// value, and `Complete` is reported by the chunk holding the last byte.
#[test]
fn partition_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value, splits: Vec<usize>) -> bool {
        let src = value.to_string();
        let chunks = split_at_seeds(src.as_bytes(), &splits);
        let Some((last, init)) = chunks.split_last() else {
            return false;
        };

        let mut parser = PushParser::new();
        for chunk in init {
            if parser.put_buffer(chunk) != Ok(Status::Continue) {
                return false;
            }
        }

        // A root number is only delimited by the end of input.
        let expected_last = if value.is_number() {
            Status::Continue
        } else {
            Status::Complete
        };
        if parser.put_buffer(last) != Ok(expected_last) {
            return false;
        }
        parser.finish() == Ok(value)
    }

    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Value, Vec<usize>) -> bool);
}

/// Property: once a byte fails, every later byte fails with the same error.
#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn errors_are_sticky(input: Vec<u8>) -> bool {
    let mut parser = PushParser::new();
    let mut first = None;
    for byte in input {
        match (parser.put_byte(byte), &first) {
            (Err(err), None) => first = Some(err),
            (Err(err), Some(first)) if err != *first => return false,
            (Ok(_), Some(_)) => return false,
            _ => {}
        }
    }
    first.is_none() || parser.is_failed()
}

/// Property: a byte after a completed value is always rejected.
#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn completed_parser_rejects_more_input(value: Value, byte: u8) -> bool {
    if value.is_number() {
        return true;
    }
    let mut parser = PushParser::new();
    if parser.put_buffer(value.to_string()) != Ok(Status::Complete) {
        return false;
    }
    parser.put_byte(byte).is_err() && parser.is_failed()
}
