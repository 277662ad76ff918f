use std::fmt;

/// Character used when a label containing the terminator is rendered.
pub const SENTINEL: char = '$';

/// One position of the indexed text.
///
/// The terminator is its own variant rather than a reserved `char`, so no
/// input character can ever collide with it. It orders before every
/// character, which puts sentinel edges first in key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// End-of-text marker appended once after the input.
    Sentinel,

    /// A character from the input (already case folded, if folding applies).
    Char(char),
}

impl Symbol {
    /// The character this symbol renders as.
    pub fn as_char(self) -> char {
        match self {
            Symbol::Sentinel => SENTINEL,
            Symbol::Char(c) => c,
        }
    }

    pub fn is_sentinel(self) -> bool {
        matches!(self, Symbol::Sentinel)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Simple per-character lower-casing.
///
/// Characters whose lowercase form is longer than one `char` are kept as-is so
/// that folded text stays index-aligned with the input.
pub(crate) fn fold(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_lowercase();
    }
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}
