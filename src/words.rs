//! Whole-word containment checks for weapon names.
//!
//! Name rules only fire when their pattern appears as a standalone word, so
//! `"Spear"` matches `"Steel Spear"` but not `"Spearhead"`. Hyphenated
//! patterns like `"Dai-Katana"` are treated as one atomic token and checked
//! by plain substring containment instead, since splitting on internal
//! punctuation would tear them apart.

/// Returns true if `word` occurs in `source` as a whole word (or, for
/// hyphenated words, as a case-insensitive substring).
///
/// Tokens are produced by splitting `source` on spaces; consecutive spaces
/// collapse and empty tokens are discarded. Comparison is ASCII
/// case-insensitive throughout.
pub fn contains_word(source: &str, word: &str) -> bool {
    if source.is_empty() || word.is_empty() {
        return false;
    }

    if word.contains('-') {
        return contains_ignore_case(source, word);
    }

    source
        .split(' ')
        .filter(|token| !token.is_empty())
        .any(|token| token.eq_ignore_ascii_case(word))
}

/// Case-insensitive substring test.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    find_ignore_case(haystack, needle).is_some()
}

/// Byte offset of the first case-insensitive occurrence of `needle` in
/// `haystack`, if any.
pub(crate) fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    let haystack_bytes = haystack.as_bytes();
    let needle_bytes = needle.as_bytes();
    (0..=haystack_bytes.len() - needle_bytes.len()).find(|&start| {
        haystack_bytes[start..start + needle_bytes.len()].eq_ignore_ascii_case(needle_bytes)
    })
}
