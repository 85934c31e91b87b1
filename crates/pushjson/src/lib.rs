//! A push-style JSON parser.
//!
//! Input is fed one byte, or one buffer, at a time into a [`PushParser`]; the
//! parser never needs the whole document in memory and can be resumed after
//! any byte. The result is an owned [`Value`] tree.
//!
//! ```rust
//! use pushjson::{PushParser, Status, Value};
//!
//! let mut parser = PushParser::new();
//! for chunk in [&b"{\"a\": 1, \"b\": [1,"[..], &b"2,3], \"c\": {\"d\": true}}"[..]] {
//!     if parser.put_buffer(chunk)? == Status::Complete {
//!         break;
//!     }
//! }
//! let root = parser.into_value().unwrap();
//! assert_eq!(root.get("c").and_then(|c| c.get("d")), Some(&Value::Boolean(true)));
//! assert_eq!(root.get("z"), None);
//! # Ok::<(), pushjson::ParseError>(())
//! ```
//!
//! Known limitations: `\uXXXX` escapes, exponents and a leading `+` are not
//! supported.

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod options;
mod parser;
mod value;

#[cfg(test)]
mod tests;

pub use error::{ParseError, SyntaxError};
pub use options::{DEFAULT_MAX_DEPTH, ParserOptions};
pub use parser::{Position, PushParser, Status, parse_slice, parse_slice_with, parse_str};
pub use value::{Array, Kind, Object, Pair, Value};
