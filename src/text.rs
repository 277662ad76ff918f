use crate::symbol::{fold, Symbol};
use std::ops::Range;

/// The indexed text: input characters, optionally folded, plus the sentinel.
///
/// Edge labels are ranges into this buffer; nothing in the tree copies text.
#[derive(Debug)]
pub(crate) struct TextBuffer {
    original: String,
    symbols: Vec<Symbol>,
    case_sensitive: bool,
}

impl TextBuffer {
    pub(crate) fn new(text: &str, case_sensitive: bool) -> Self {
        let mut symbols: Vec<Symbol> = text
            .chars()
            .map(|c| Symbol::Char(if case_sensitive { c } else { fold(c) }))
            .collect();
        symbols.push(Symbol::Sentinel);

        Self {
            original: text.to_owned(),
            symbols,
            case_sensitive,
        }
    }

    /// Length including the sentinel.
    pub(crate) fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Number of input characters (sentinel excluded).
    pub(crate) fn text_len(&self) -> usize {
        self.symbols.len() - 1
    }

    pub(crate) fn original(&self) -> &str {
        &self.original
    }

    pub(crate) fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub(crate) fn at(&self, index: usize) -> Symbol {
        self.symbols[index]
    }

    pub(crate) fn slice(&self, range: Range<usize>) -> &[Symbol] {
        &self.symbols[range]
    }

    pub(crate) fn render(&self, range: Range<usize>) -> String {
        self.symbols[range].iter().map(|s| s.as_char()).collect()
    }

    /// Converts a query into symbols under the same case policy as the text.
    ///
    /// Query characters always become `Symbol::Char`, so a `$` in a pattern
    /// never matches the sentinel.
    pub(crate) fn pattern(&self, pattern: &str) -> Vec<Symbol> {
        pattern
            .chars()
            .map(|c| Symbol::Char(if self.case_sensitive { c } else { fold(c) }))
            .collect()
    }
}
