//! The two rewrite engines.
//!
//! [`rewrite_name`] applies the name table with first-match-wins semantics
//! over whole words. [`rewrite_description`] applies the description table
//! sequentially, letting several rules fire across one string while the
//! region tracker keeps later rules out of spans earlier rules produced.
//!
//! Both functions are pure: same input, same toggles, same table, same
//! output. Callers compare output against input to decide whether a record
//! actually changed; returning the input unchanged is the "no match" signal.

use crate::regions::{RegionTracker, Span};
use crate::rules::{CategoryToggles, DescriptionRule, NameRule};
use crate::words::{contains_word, find_ignore_case};

/// Rewrite a weapon display name.
///
/// Rules whose category is disabled are skipped without consuming the match
/// slot. The first enabled rule whose pattern occurs as a whole word wins;
/// no further rules are evaluated for this name. An empty name is returned
/// as-is.
pub fn rewrite_name(original: &str, rules: &[NameRule], toggles: &CategoryToggles) -> String {
    if original.is_empty() {
        return String::new();
    }

    for rule in rules {
        if !toggles.enabled(rule.category) {
            continue;
        }
        if !contains_word(original, rule.pattern) {
            continue;
        }
        return if rule.pattern.contains('-') {
            // Hyphenated patterns matched as substrings, so replace them as
            // substrings too.
            replace_all_ignore_case(original, rule.pattern, rule.replacement)
        } else {
            replace_word_tokens(original, rule.pattern, rule.replacement)
        };
    }

    original.to_string()
}

/// Rewrite a perk description.
///
/// Every rule in the table is applied in order. Occurrences are exact,
/// case-sensitive substring matches; the scan is left-to-right, and after
/// each occurrence (replaced or skipped) the cursor advances past the width
/// of the rule's replacement. A span that overlaps an already-claimed
/// region is left untouched.
pub fn rewrite_description(original: &str, rules: &[DescriptionRule]) -> String {
    if original.is_empty() {
        return String::new();
    }

    let mut result = original.to_string();
    let mut tracker = RegionTracker::new();

    for rule in rules {
        let mut cursor = 0;
        while let Some(start) = find_from(&result, rule.pattern, cursor) {
            let span = Span::new(start, start + rule.pattern.len());
            if tracker.is_free(span) {
                result.replace_range(start..start + rule.pattern.len(), rule.replacement);
                tracker.claim(Span::new(start, start + rule.replacement.len()));
            }
            cursor = start + rule.replacement.len();
        }
    }

    result
}

/// Byte offset of the first occurrence of `needle` at or after `from`.
///
/// Byte-level search so the cursor may sit anywhere, including past the end
/// of the string. All table patterns are ASCII, and ASCII bytes never occur
/// inside a multi-byte UTF-8 sequence, so a hit is always a valid char
/// boundary.
fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || from + needle.len() > haystack.len() {
        return None;
    }
    (from..=haystack.len() - needle.len())
        .find(|&start| &haystack[start..start + needle.len()] == needle)
}

/// Replace every case-insensitive occurrence of `pattern` in `source`.
fn replace_all_ignore_case(source: &str, pattern: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(pos) = find_ignore_case(rest, pattern) {
        out.push_str(&rest[..pos]);
        out.push_str(replacement);
        rest = &rest[pos + pattern.len()..];
    }
    out.push_str(rest);
    out
}

/// Replace every space-delimited token equal to `pattern` (ignoring case)
/// and rejoin with single spaces.
fn replace_word_tokens(source: &str, pattern: &str, replacement: &str) -> String {
    source
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(|token| {
            if token.eq_ignore_ascii_case(pattern) {
                replacement
            } else {
                token
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
