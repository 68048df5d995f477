//! Text Formatting
//!
//! Word wrapping for transcript lines, measured in terminal columns.
//! Display-only: text that needs wrapping has its whitespace runs collapsed,
//! so the output does not round-trip to the original text.

use textwrap::core::display_width;
use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

/// Wrap `text` so that no line is wider than `width` terminal columns.
///
/// Breaks happen only at spaces and word order is kept. A word wider than
/// `width` is placed on its own line and overflows it. Empty or
/// all-whitespace input, and input whose lines already fit, is returned
/// unchanged. A `width` of 0 behaves like 1.
#[must_use]
pub fn word_wrap(text: &str, width: usize) -> String {
    let width = width.max(1);

    if text.trim().is_empty() || text.lines().all(|line| display_width(line) <= width) {
        return text.to_string();
    }

    let options = Options::new(width)
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
        .wrap_algorithm(WrapAlgorithm::FirstFit);

    let words = text.split_whitespace().collect::<Vec<_>>().join(" ");
    textwrap::wrap(&words, options).join("\n")
}
