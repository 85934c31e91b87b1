//! Byte-wise matcher for the `true`, `false` and `null` literals.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal {
    True,
    False,
    Null,
}

impl Literal {
    fn text(self) -> &'static [u8] {
        match self {
            Literal::True => b"true",
            Literal::False => b"false",
            Literal::Null => b"null",
        }
    }
}

/// What happened after feeding one more byte into the matcher?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Byte matched, but the literal is not finished yet.
    NeedMore,
    /// Byte matched *and* it was the last byte of the literal.
    Done(Literal),
    /// Byte did **not** match the expected byte.
    Reject,
}

/// Progress through one literal.
///
/// With `lenient` set, `null` accepts any bytes after the leading `n` and only
/// counts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LiteralMatcher {
    literal: Literal,
    matched: usize,
    lenient: bool,
}

impl LiteralMatcher {
    /// Start matching after the *first* byte (`n`, `t`, or `f`).
    pub(crate) fn new(first: u8, lenient_null: bool) -> Option<Self> {
        let literal = match first {
            b't' => Literal::True,
            b'f' => Literal::False,
            b'n' => Literal::Null,
            _ => return None,
        };
        Some(Self {
            literal,
            matched: 1,
            lenient: lenient_null && literal == Literal::Null,
        })
    }

    pub(crate) fn step(&mut self, byte: u8) -> Step {
        let text = self.literal.text();
        let Some(&expected) = text.get(self.matched) else {
            return Step::Reject;
        };
        if byte != expected && !self.lenient {
            return Step::Reject;
        }

        self.matched += 1;
        if self.matched == text.len() {
            Step::Done(self.literal)
        } else {
            Step::NeedMore
        }
    }
}
