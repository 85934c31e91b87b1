//! JSON value tree.
//!
//! This module defines the [`Value`] enum produced by the parser, the
//! [`Object`] pair list with first-match key lookup, and the [`Kind`] tag used
//! to describe a value (or a value still being parsed).
//!
//! Objects keep their members in insertion order and retain duplicate keys.
//! Strings are byte strings: escapes are resolved but the bytes are not
//! required to be valid UTF-8.
use alloc::{string::String, vec::Vec};
use core::fmt::{self, Write as _};

use bstr::{BStr, BString, ByteSlice};

/// The element list of a JSON array.
pub type Array = Vec<Value>;

/// The kind of a JSON value.
///
/// [`Kind::Unknown`] only describes a parser context that has not seen the
/// first byte of its value yet; [`Value::kind`] never returns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Type not detected yet.
    Unknown,
    /// `{ ... }`
    Object,
    /// `[ ... ]`
    Array,
    /// `"..."`
    String,
    /// `-12.5`
    Number,
    /// `true` or `false`
    Boolean,
    /// `null`
    Null,
}

/// A JSON value.
///
/// # Examples
///
/// ```
/// use pushjson::{Object, Value};
///
/// let mut object = Object::new();
/// object.push("key", Value::from("value"));
/// let v = Value::Object(object);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// assert_eq!(v.get("key"), Some(&Value::from("value")));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(BString),
    Array(Array),
    Object(Object),
}

/// A key/value member of an [`Object`].
#[derive(Clone, Debug, PartialEq)]
pub struct Pair {
    /// The member name, escapes resolved.
    pub key: BString,
    /// The member value.
    pub value: Value,
}

/// An ordered list of object members.
///
/// Members are append-only and keep insertion order; duplicate keys are
/// retained and [`Object::get`] returns the first one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Object {
    pairs: Vec<Pair>,
}

impl Object {
    /// Creates an empty object.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Appends a member. Existing members with the same key are kept.
    pub fn push(&mut self, key: impl Into<BString>, value: Value) {
        self.pairs.push(Pair {
            key: key.into(),
            value,
        });
    }

    /// Returns the value of the first member named `key`.
    ///
    /// There is no distinction between a missing key and any particular
    /// value: `None` only means no member matched.
    ///
    /// ```
    /// use pushjson::{Object, Value};
    ///
    /// let mut object = Object::new();
    /// object.push("a", Value::from(1.0));
    /// object.push("a", Value::from(2.0));
    /// assert_eq!(object.get("a"), Some(&Value::Number(1.0)));
    /// assert_eq!(object.get("b"), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Value> {
        let key = key.as_ref();
        self.pairs
            .iter()
            .find(|pair| pair.key.as_slice() == key)
            .map(|pair| &pair.value)
    }

    /// Mutable variant of [`Object::get`].
    pub fn get_mut(&mut self, key: impl AsRef<[u8]>) -> Option<&mut Value> {
        let key = key.as_ref();
        self.pairs
            .iter_mut()
            .find(|pair| pair.key.as_slice() == key)
            .map(|pair| &mut pair.value)
    }

    /// Iterates over the values of every member named `key`, in order.
    pub fn get_all<'a>(&'a self, key: &'a [u8]) -> impl Iterator<Item = &'a Value> + 'a {
        self.pairs
            .iter()
            .filter(move |pair| pair.key.as_slice() == key)
            .map(|pair| &pair.value)
    }

    /// Number of members, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` for `{}`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over members in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, Pair> {
        self.pairs.iter()
    }

    /// Iterates over member names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &BStr> {
        self.pairs.iter().map(|pair| pair.key.as_bstr())
    }

    /// The members as a slice.
    #[must_use]
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = &'a Pair;
    type IntoIter = core::slice::Iter<'a, Pair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl IntoIterator for Object {
    type Item = Pair;
    type IntoIter = alloc::vec::IntoIter<Pair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<K: Into<BString>> FromIterator<(K, Value)> for Object {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(key, value)| Pair {
                    key: key.into(),
                    value,
                })
                .collect(),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v.into())
    }
}

impl From<BString> for Value {
    fn from(v: BString) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Creates the empty value of `kind`: `{}`, `[]`, `""`, `0`, `false` or
    /// `null`. Returns `None` for [`Kind::Unknown`].
    #[must_use]
    pub fn empty(kind: Kind) -> Option<Self> {
        Some(match kind {
            Kind::Unknown => return None,
            Kind::Object => Self::Object(Object::new()),
            Kind::Array => Self::Array(Array::new()),
            Kind::String => Self::String(BString::default()),
            Kind::Number => Self::Number(0.0),
            Kind::Boolean => Self::Boolean(false),
            Kind::Null => Self::Null,
        })
    }

    /// The kind of this value.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Null => Kind::Null,
            Self::Boolean(_) => Kind::Boolean,
            Self::Number(_) => Kind::Number,
            Self::String(_) => Kind::String,
            Self::Array(_) => Kind::Array,
            Self::Object(_) => Kind::Object,
        }
    }

    /// Looks up the first member named `key`.
    ///
    /// Returns `None` when `self` is not an object or when no member matches.
    ///
    /// # Examples
    ///
    /// ```
    /// let value = pushjson::parse_str(r#"{"a":1,"a":2}"#).unwrap();
    /// assert_eq!(value.get("a"), Some(&pushjson::Value::Number(1.0)));
    /// assert_eq!(value.get("z"), None);
    /// assert_eq!(pushjson::Value::Null.get("a"), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Value> {
        match self {
            Self::Object(object) => object.get(key),
            _ => None,
        }
    }

    /// Returns `true` if the value is [`Null`](Value::Null).
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is a [`Boolean`](Value::Boolean).
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is a [`Number`](Value::Number).
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns `true` if the value is a [`String`](Value::String).
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is an [`Array`](Value::Array).
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is an [`Object`](Value::Object).
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The raw bytes of a string value.
    #[must_use]
    pub fn as_bstr(&self) -> Option<&BStr> {
        match self {
            Self::String(s) => Some(s.as_bstr()),
            _ => None,
        }
    }

    /// The text of a string value, if it is valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_bstr().and_then(|s| s.to_str().ok())
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }
}

/// Writes `src` as the body of a JSON string literal.
///
/// Only the escapes the parser decodes are produced (`\"`, `\\`, `\b`, `\f`,
/// `\n`, `\r`, `\t`); other control characters are written raw, which the
/// parser accepts. Invalid UTF-8 sequences are replaced with U+FFFD.
fn write_escaped<W: fmt::Write>(src: &[u8], f: &mut W) -> fmt::Result {
    for chunk in src.utf8_chunks() {
        for c in chunk.valid().chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\u{8}' => f.write_str("\\b")?,
                '\u{c}' => f.write_str("\\f")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                _ => f.write_char(c)?,
            }
        }
        if !chunk.invalid().is_empty() {
            f.write_char(char::REPLACEMENT_CHARACTER)?;
        }
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            // `f64`'s `Display` never uses exponent notation, which the
            // parser does not read.
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => {
                f.write_char('"')?;
                write_escaped(s, f)?;
                f.write_char('"')
            }
            Value::Array(arr) => {
                f.write_char('[')?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_char(']')
            }
            Value::Object(object) => write!(f, "{object}"),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for (i, pair) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            f.write_char('"')?;
            write_escaped(&pair.key, f)?;
            write!(f, "\":{}", pair.value)?;
        }
        f.write_char('}')
    }
}

#[cfg(any(test, feature = "serde"))]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => match s.to_str() {
                Ok(text) => serializer.serialize_str(text),
                Err(_) => serializer.serialize_bytes(s),
            },
            Value::Array(arr) => serializer.collect_seq(arr),
            Value::Object(object) => serde::Serialize::serialize(object, serializer),
        }
    }
}

#[cfg(any(test, feature = "serde"))]
impl serde::Serialize for Object {
    /// Members are serialized in order; duplicate keys are passed through to
    /// the serializer as-is.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.pairs
                .iter()
                .map(|pair| (pair.key.to_str_lossy(), &pair.value)),
        )
    }
}
