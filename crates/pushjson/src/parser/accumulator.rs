//! Token accumulator.
//!
//! Holds the raw bytes of the token currently being lexed (string body,
//! number digits). Growth is amortized by `Vec`; taking the contents leaves an
//! empty buffer behind, so each completed token starts from scratch.

use alloc::vec::Vec;

#[derive(Debug, Default)]
pub(crate) struct Accumulator {
    bytes: Vec<u8>,
}

impl Accumulator {
    pub(crate) fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    #[inline]
    pub(crate) fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Moves the token out, resetting the accumulator.
    pub(crate) fn take(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.bytes)
    }

    pub(crate) fn clear(&mut self) {
        self.bytes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::Accumulator;

    #[test]
    fn take_resets() {
        let mut acc = Accumulator::new();
        for &b in b"abc" {
            acc.push(b);
        }
        assert_eq!(acc.as_bytes(), b"abc");
        assert_eq!(acc.take(), b"abc");
        assert!(acc.as_bytes().is_empty());
        acc.push(b'd');
        assert_eq!(acc.as_bytes(), b"d");
    }

    #[test]
    fn clear_discards() {
        let mut acc = Accumulator::new();
        acc.push(b'1');
        acc.clear();
        assert!(acc.take().is_empty());
    }
}
