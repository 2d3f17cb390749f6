// src/words/classify.rs
// =============================================================================
// This module decides which words from a page are worth counting.
//
// We only count two narrow kinds of token:
// - Hex-looking numbers such as "0x1F" or "12XfF" (stored lower-cased)
// - Runs of the symbols - = / { } > such as "->" or "==" (stored as-is)
//
// Every other word ("hello", "42", "0x") is ignored.
//
// We use the `regex` crate for the patterns and `once_cell` so each pattern
// is compiled exactly once, the first time it is needed.
//
// Rust concepts:
// - Option<T>: A token is either countable (Some) or not (None)
// - Lazy statics: Values built on first use and shared afterwards
// - Iterators: Splitting text without allocating a Vec
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;

// Characters that separate words inside a text run.
// ASCII whitespace plus , . ! ? ; : " ' [ ] { } ( )
static DELIMITERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[\t\n\x0B\x0C\r ,.!?;:"'\[\]{}()]+"#).expect("delimiter pattern is valid")
});

// <digits> x <hex digits>, optionally followed by one trailing comma
static HEX_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+[xX][0-9a-fA-F]+,?$").expect("hex pattern is valid"));

// One or more of: - = / { } >
static SYMBOL_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-=/{}>]+$").expect("symbol pattern is valid"));

// Splits a text run into raw words
//
// Parameters:
//   text: the characters of one text event
//
// Returns: an iterator over the non-empty pieces between delimiters
//
// Example:
//   "see 0x1F, then -> done." -> ["see", "0x1F", "then", "->", "done"]
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    DELIMITERS.split(text).filter(|word| !word.is_empty())
}

// Classifies a single word
//
// Parameters:
//   word: a raw word (may still carry surrounding whitespace)
//
// Returns: Some(key) if the word should be counted, None otherwise
//
// Examples:
//   "0X1f," -> Some("0x1f,")   (lower-cased, trailing comma kept)
//   "->"    -> Some("->")      (kept exactly as written)
//   "hello" -> None
pub fn classify(word: &str) -> Option<String> {
    // Only ASCII control characters and spaces; U+00A0 (&nbsp;) stays
    let word = word.trim_matches(|c: char| c <= ' ');

    if word.is_empty() {
        return None;
    }

    if HEX_NUMBER.is_match(word) {
        return Some(word.to_lowercase());
    }

    if SYMBOL_RUN.is_match(word) {
        return Some(word.to_string());
    }

    None
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is Lazy?
//    - Lazy::new(|| ...) stores a closure instead of a value
//    - The closure runs the first time the static is used
//    - After that every caller shares the same compiled Regex
//    - Compiling a regex is slow, matching with it is fast
//
// 2. Why does classify return Option<String> and not bool?
//    - The caller needs the key to store, not just a yes/no
//    - Hex numbers get lower-cased, so the key can differ from the input
//
// 3. What does `impl Iterator<Item = &str>` mean?
//    - "Some iterator type that yields string slices"
//    - The slices borrow from `text`, so nothing is copied
// -----------------------------------------------------------------------------
