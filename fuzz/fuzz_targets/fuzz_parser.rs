#![no_main]

use arbitrary::Arbitrary;
use bstr::ByteSlice;
use libfuzzer_sys::fuzz_target;
use pushjson::{ParserOptions, PushParser, Status, Value, parse_slice_with};

#[derive(Debug, Arbitrary)]
struct Input {
    allow_leading_whitespace: bool,
    lenient_null: bool,
    max_depth: u8,
    /// Chunk boundaries, reduced modulo the remaining length.
    splits: Vec<u16>,
    data: Vec<u8>,
}

/// Whether `Display` output reproduces `value` exactly: numbers must be
/// finite and strings valid UTF-8.
fn displays_exactly(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_finite(),
        Value::String(s) => s.to_str().is_ok(),
        Value::Array(items) => items.iter().all(displays_exactly),
        Value::Object(object) => object
            .iter()
            .all(|pair| pair.key.to_str().is_ok() && displays_exactly(&pair.value)),
        _ => true,
    }
}

fn feed_chunks(options: ParserOptions, data: &[u8], splits: &[u16]) -> Option<Value> {
    let mut parser = PushParser::with_options(options);
    let mut rest = data;
    for &s in splits {
        if rest.is_empty() {
            break;
        }
        let (chunk, tail) = rest.split_at(1 + usize::from(s) % rest.len());
        match parser.put_buffer(chunk) {
            Ok(Status::Continue) => rest = tail,
            Ok(Status::Complete) => return parser.into_value(),
            Err(_) => {
                // Poisoned parsers never recover.
                assert!(tail.is_empty() || parser.put_buffer(tail).is_err());
                return None;
            }
        }
    }
    if parser.put_buffer(rest).ok()? == Status::Complete {
        return parser.into_value();
    }
    parser.finish().ok()
}

fuzz_target!(|input: Input| {
    let options = ParserOptions {
        max_depth: usize::from(input.max_depth).max(1),
        allow_leading_whitespace: input.allow_leading_whitespace,
        lenient_null: input.lenient_null,
    };

    let chunked = feed_chunks(options, &input.data, &input.splits);
    let whole = parse_slice_with(&input.data, options).ok();
    if let Some(whole) = &whole {
        // Whole-slice parsing only adds trailing whitespace on top.
        assert_eq!(chunked.as_ref(), Some(whole));
    }

    if let Some(value) = chunked.filter(displays_exactly) {
        let text = value.to_string();
        let reparsed = parse_slice_with(text.as_bytes(), options)
            .unwrap_or_else(|err| panic!("display output {text:?} did not parse: {err}"));
        assert_eq!(reparsed, value);
    }
});
