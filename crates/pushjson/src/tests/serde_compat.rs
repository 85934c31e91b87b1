//! Cross-checks parsed trees against `serde_json` on documents both accept.

use alloc::vec::Vec;

use rstest::rstest;

use crate::{Object, Value, parse_str};

fn from_serde(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::from(s),
        serde_json::Value::Array(items) => {
            Value::Array(items.into_iter().map(from_serde).collect::<Vec<_>>())
        }
        serde_json::Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, from_serde(v)))
                .collect::<Object>(),
        ),
    }
}

#[rstest]
#[case::scalar_true("true")]
#[case::scalar_null("null")]
#[case::scalar_string(r#""plain""#)]
#[case::scalar_number("12.5")]
#[case::negative_zero("-0")]
#[case::escapes(r#""\b\f\n\r\t\"\\\/""#)]
#[case::unicode_text(r#"{"grüße":"日本語"}"#)]
#[case::nested(r#"{"a":{"b":{"c":[1,[2,[3,[]]],{}]}}}"#)]
#[case::mixed_array(r#"[null,true,false,0,-1.5,"",{},[]]"#)]
#[case::spaced("{ \"k\" :\n [ 1 ,\t2 ] ,\r\n \"m\" : { } }")]
#[case::key_order(r#"{"z":1,"a":2,"m":3}"#)]
#[case::integers("[0,7,-42,1024,9007199254740992]")]
fn matches_serde_json(#[case] text: &str) {
    let expected = from_serde(serde_json::from_str(text).unwrap());
    assert_eq!(parse_str(text).unwrap(), expected);
}

#[test]
fn serialize_matches_input() {
    let text = r#"{"name":"x","tags":["a","b"],"nested":{"ok":true,"none":null}}"#;
    let value = parse_str(text).unwrap();
    assert_eq!(serde_json::to_string(&value).unwrap(), text);

    let reparsed: serde_json::Value = serde_json::to_value(&value).unwrap();
    assert_eq!(reparsed, serde_json::from_str::<serde_json::Value>(text).unwrap());
}

#[rstest]
#[case::exponent("1e3")]
#[case::unicode_escape(r#""\u00e9""#)]
#[case::uppercase_exponent("[2E-2]")]
fn serde_json_is_wider(#[case] text: &str) {
    assert!(serde_json::from_str::<serde_json::Value>(text).is_ok());
    assert!(parse_str(text).is_err());
}
