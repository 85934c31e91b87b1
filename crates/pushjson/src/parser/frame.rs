//! One parse context: the state machine for a single JSON value.
//!
//! A frame never recurses into nested values itself. When it needs a member
//! parsed it returns [`Step::Spawn`], and the owning [`PushParser`] pushes a
//! child frame, forwards bytes to it, and hands the finished value back
//! through [`Frame::attach`].
//!
//! [`PushParser`]: crate::PushParser

use bstr::BString;

use super::{
    accumulator::Accumulator,
    literal::{Literal, LiteralMatcher, Step as LiteralStep},
};
use crate::{Array, Kind, Object, ParserOptions, SyntaxError, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    /// Waiting for the first byte of the value.
    Element,
    ObjectPair,
    /// A child frame is parsing the member name.
    ObjectKey,
    ObjectKeyParsed,
    /// Waiting for, or parsing through a child, the member value.
    ObjectValue,
    ObjectAfterValue,
    ArrayValue,
    ArrayAfterValue,
    String,
    /// After a backslash inside a string.
    SpecChar,
    Number,
    Boolean(LiteralMatcher),
    Null(LiteralMatcher),
}

/// Which child frame the parser has to push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Spawn {
    /// A member name. The opening quote is already consumed.
    Key,
    /// A member value or array element. The current byte is its first byte
    /// and must be fed to the child.
    Element,
}

#[derive(Debug)]
pub(crate) enum Step {
    Continue,
    Spawn(Spawn),
    /// The value is finished. `consumed` is `false` when the byte only
    /// delimited the value (`1,`), in which case the parent must see it too.
    Complete { value: Value, consumed: bool },
}

#[inline]
pub(crate) fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\n' | b'\t' | b'\r')
}

fn unexpected(byte: u8, expected: &'static str) -> SyntaxError {
    SyntaxError::UnexpectedByte { byte, expected }
}

#[derive(Debug)]
pub(crate) struct Frame {
    state: State,
    kind: Kind,
    /// Containers are built in place; scalars are produced on completion.
    value: Value,
    accumulator: Accumulator,
    /// Name of the member whose value is being parsed.
    pending_key: Option<BString>,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    pub(crate) fn new() -> Self {
        Self {
            state: State::Element,
            kind: Kind::Unknown,
            value: Value::Null,
            accumulator: Accumulator::new(),
            pending_key: None,
        }
    }

    /// A frame already past the opening quote of an object key.
    pub(crate) fn key() -> Self {
        Self {
            state: State::String,
            kind: Kind::String,
            ..Self::new()
        }
    }

    pub(crate) fn state(&self) -> State {
        self.state
    }

    pub(crate) fn kind(&self) -> Kind {
        self.kind
    }

    /// Advances the state machine by one byte.
    ///
    /// `depth` is the number of ancestors of this frame; the root has no
    /// parent and is at depth 0.
    pub(crate) fn put_byte(
        &mut self,
        byte: u8,
        depth: usize,
        options: &ParserOptions,
    ) -> Result<Step, SyntaxError> {
        match self.state {
            State::Element => self.dispatch(byte, depth, options),
            State::ObjectPair => match byte {
                b if is_whitespace(b) => Ok(Step::Continue),
                b'"' => {
                    self.state = State::ObjectKey;
                    Ok(Step::Spawn(Spawn::Key))
                }
                b'}' => Ok(self.complete_container()),
                _ => Err(unexpected(byte, "'\"' or '}'")),
            },
            // Keys are always parsed by a child frame; a byte reaching the
            // object itself here means no key was spawned.
            State::ObjectKey => Err(unexpected(byte, "an object key")),
            State::ObjectKeyParsed => match byte {
                b if is_whitespace(b) => Ok(Step::Continue),
                b':' => {
                    self.state = State::ObjectValue;
                    Ok(Step::Continue)
                }
                _ => Err(unexpected(byte, "':'")),
            },
            State::ObjectValue => {
                if is_whitespace(byte) {
                    Ok(Step::Continue)
                } else {
                    Ok(Step::Spawn(Spawn::Element))
                }
            }
            State::ObjectAfterValue => match byte {
                b if is_whitespace(b) => Ok(Step::Continue),
                b',' => {
                    self.state = State::ObjectPair;
                    Ok(Step::Continue)
                }
                b'}' => Ok(self.complete_container()),
                _ => Err(unexpected(byte, "',' or '}'")),
            },
            State::ArrayValue => match byte {
                b if is_whitespace(b) => Ok(Step::Continue),
                b']' if matches!(&self.value, Value::Array(array) if array.is_empty()) => {
                    Ok(self.complete_container())
                }
                _ => Ok(Step::Spawn(Spawn::Element)),
            },
            State::ArrayAfterValue => match byte {
                b if is_whitespace(b) => Ok(Step::Continue),
                b',' => {
                    self.state = State::ArrayValue;
                    Ok(Step::Continue)
                }
                b']' => Ok(self.complete_container()),
                _ => Err(unexpected(byte, "',' or ']'")),
            },
            State::String => {
                match byte {
                    b'"' => {
                        let bytes = self.accumulator.take();
                        return Ok(Step::Complete {
                            value: Value::String(BString::from(bytes)),
                            consumed: true,
                        });
                    }
                    b'\\' => self.state = State::SpecChar,
                    _ => self.accumulator.push(byte),
                }
                Ok(Step::Continue)
            }
            State::SpecChar => {
                let decoded = match byte {
                    b'b' => 0x08,
                    b'f' => 0x0c,
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    b'"' | b'\\' | b'/' => byte,
                    _ => return Err(SyntaxError::InvalidEscape(byte)),
                };
                self.accumulator.push(decoded);
                self.state = State::String;
                Ok(Step::Continue)
            }
            State::Number => match byte {
                b'0'..=b'9' | b'.' => {
                    self.accumulator.push(byte);
                    Ok(Step::Continue)
                }
                b if is_whitespace(b) => Ok(Step::Complete {
                    value: self.finish_number()?,
                    consumed: true,
                }),
                b',' | b'}' | b']' => Ok(Step::Complete {
                    value: self.finish_number()?,
                    consumed: false,
                }),
                _ => Err(unexpected(byte, "a digit, '.' or a delimiter")),
            },
            State::Boolean(ref mut matcher) | State::Null(ref mut matcher) => {
                match matcher.step(byte) {
                    LiteralStep::NeedMore => Ok(Step::Continue),
                    LiteralStep::Done(literal) => Ok(Step::Complete {
                        value: match literal {
                            Literal::True => Value::Boolean(true),
                            Literal::False => Value::Boolean(false),
                            Literal::Null => Value::Null,
                        },
                        consumed: true,
                    }),
                    LiteralStep::Reject => Err(SyntaxError::InvalidLiteral { byte }),
                }
            }
        }
    }

    /// Fixes the kind of the value from its first byte.
    fn dispatch(
        &mut self,
        byte: u8,
        depth: usize,
        options: &ParserOptions,
    ) -> Result<Step, SyntaxError> {
        match byte {
            b'{' | b'[' => {
                if depth >= options.max_depth {
                    return Err(SyntaxError::DepthLimitExceeded(options.max_depth));
                }
                if byte == b'{' {
                    self.start(Kind::Object, State::ObjectPair);
                    self.value = Value::Object(Object::new());
                } else {
                    self.start(Kind::Array, State::ArrayValue);
                    self.value = Value::Array(Array::new());
                }
            }
            b'"' => self.start(Kind::String, State::String),
            b't' | b'f' | b'n' => {
                let Some(matcher) = LiteralMatcher::new(byte, options.lenient_null) else {
                    return Err(unexpected(byte, "a value"));
                };
                if byte == b'n' {
                    self.start(Kind::Null, State::Null(matcher));
                } else {
                    self.start(Kind::Boolean, State::Boolean(matcher));
                }
            }
            b'-' | b'0'..=b'9' => {
                self.start(Kind::Number, State::Number);
                self.accumulator.push(byte);
            }
            b if depth == 0 && options.allow_leading_whitespace && is_whitespace(b) => {}
            _ => return Err(unexpected(byte, "a value")),
        }
        Ok(Step::Continue)
    }

    fn start(&mut self, kind: Kind, state: State) {
        self.kind = kind;
        self.state = state;
    }

    fn complete_container(&mut self) -> Step {
        Step::Complete {
            value: core::mem::take(&mut self.value),
            consumed: true,
        }
    }

    /// Parses the accumulated digits. Also used at end of input, where a root
    /// number has no delimiter.
    pub(crate) fn finish_number(&mut self) -> Result<Value, SyntaxError> {
        let number = core::str::from_utf8(self.accumulator.as_bytes())
            .ok()
            .and_then(|text| text.parse::<f64>().ok())
            .ok_or(SyntaxError::InvalidNumber)?;
        self.accumulator.clear();
        Ok(Value::Number(number))
    }

    /// Folds a finished child value into this container.
    ///
    /// Only the states that spawn children can receive one; anything else is
    /// a driver bug, checked in test and fuzz builds.
    pub(crate) fn attach(&mut self, child: Value) {
        match (self.state, &mut self.value) {
            (State::ObjectKey, _) => {
                #[cfg(any(test, feature = "fuzzing"))]
                assert!(
                    child.is_string(),
                    "Internal error: object key parsed as {:?}",
                    child.kind()
                );
                if let Value::String(key) = child {
                    self.pending_key = Some(key);
                }
                self.state = State::ObjectKeyParsed;
            }
            (State::ObjectValue, Value::Object(object)) => {
                #[cfg(any(test, feature = "fuzzing"))]
                assert!(
                    self.pending_key.is_some(),
                    "Internal error: object member without a key"
                );
                object.push(self.pending_key.take().unwrap_or_default(), child);
                self.state = State::ObjectAfterValue;
            }
            (State::ArrayValue, Value::Array(array)) => {
                array.push(child);
                self.state = State::ArrayAfterValue;
            }
            #[cfg(any(test, feature = "fuzzing"))]
            (state, _) => panic!("Internal error: child value attached in state {state:?}"),
            #[cfg(not(any(test, feature = "fuzzing")))]
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(frame: &mut Frame, bytes: &[u8]) -> Result<Step, SyntaxError> {
        let options = ParserOptions::default();
        let mut last = Step::Continue;
        for &b in bytes {
            last = frame.put_byte(b, 0, &options)?;
        }
        Ok(last)
    }

    #[test]
    fn string_resolves_escapes() {
        let mut frame = Frame::new();
        let step = feed(&mut frame, br#""a\nb\/\"""#).unwrap();
        let Step::Complete { value, consumed } = step else {
            panic!("expected completion, got {step:?}");
        };
        assert!(consumed);
        assert_eq!(value, Value::from("a\nb/\""));
    }

    #[test]
    fn number_leaves_delimiter_to_parent() {
        let mut frame = Frame::new();
        let step = feed(&mut frame, b"-12.5]").unwrap();
        let Step::Complete { value, consumed } = step else {
            panic!("expected completion, got {step:?}");
        };
        assert!(!consumed);
        assert_eq!(value, Value::Number(-12.5));
    }

    #[test]
    fn object_asks_for_children() {
        let mut frame = Frame::new();
        let options = ParserOptions::default();
        assert!(matches!(frame.put_byte(b'{', 0, &options), Ok(Step::Continue)));
        assert!(matches!(
            frame.put_byte(b'"', 0, &options),
            Ok(Step::Spawn(Spawn::Key))
        ));
        frame.attach(Value::from("k"));
        assert_eq!(frame.state(), State::ObjectKeyParsed);
        assert!(matches!(frame.put_byte(b':', 0, &options), Ok(Step::Continue)));
        assert!(matches!(
            frame.put_byte(b'7', 0, &options),
            Ok(Step::Spawn(Spawn::Element))
        ));
        frame.attach(Value::Number(7.0));
        let Ok(Step::Complete { value, .. }) = frame.put_byte(b'}', 0, &options) else {
            panic!("object did not complete");
        };
        assert_eq!(value.get("k"), Some(&Value::Number(7.0)));
    }

    #[test]
    fn depth_limit_applies_to_containers_only() {
        let options = ParserOptions {
            max_depth: 1,
            ..Default::default()
        };
        let mut frame = Frame::new();
        assert_eq!(
            frame.put_byte(b'[', 1, &options).unwrap_err(),
            SyntaxError::DepthLimitExceeded(1)
        );
        let mut frame = Frame::new();
        assert!(frame.put_byte(b'1', 1, &options).is_ok());
    }

    #[test]
    #[should_panic(expected = "Internal error: child value attached in state Element")]
    fn attach_outside_a_container_is_caught() {
        let mut frame = Frame::new();
        frame.attach(Value::Null);
    }

    #[test]
    #[should_panic(expected = "Internal error: object key parsed as Number")]
    fn attach_non_string_key_is_caught() {
        let mut frame = Frame::new();
        let options = ParserOptions::default();
        assert!(frame.put_byte(b'{', 0, &options).is_ok());
        assert!(frame.put_byte(b'"', 0, &options).is_ok());
        frame.attach(Value::Number(1.0));
    }

    #[test]
    #[should_panic(expected = "Internal error: object member without a key")]
    fn attach_member_without_key_is_caught() {
        let mut frame = Frame::new();
        let options = ParserOptions::default();
        assert!(frame.put_byte(b'{', 0, &options).is_ok());
        assert!(frame.put_byte(b'"', 0, &options).is_ok());
        frame.attach(Value::from("k"));
        assert!(frame.put_byte(b':', 0, &options).is_ok());
        frame.pending_key = None;
        frame.attach(Value::Null);
    }

    #[test]
    fn invalid_escape() {
        let mut frame = Frame::new();
        assert_eq!(
            feed(&mut frame, br#""\u0041""#).unwrap_err(),
            SyntaxError::InvalidEscape(b'u')
        );
    }
}
