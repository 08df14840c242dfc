//! Caret-preserving regex replacement engine
//!
//! Every normalization pass is a list of [`Rule`]s applied in order. Each rule
//! rewrites all of its matches left to right in a single sweep, and the caret
//! is carried through every edit so that a live editor can put the cursor back
//! where the user left it.
//!
//! Carets are counted in chars (Unicode scalar values), not bytes.

use regex::{Captures, Regex};
use std::fmt;
use std::ops::Range;

/// Builds the replacement for one match, or declines it with `None`.
///
/// Declining is how rules express context checks the regex engine cannot
/// (look-behind and look-ahead): the matched text is then left as is.
pub type ReplaceFn = Box<dyn Fn(&Captures<'_>, &str, Range<usize>) -> Option<String> + Send + Sync>;

/// A named rewrite: a pattern plus the function producing its replacement
pub struct Rule {
    pub name: String,
    pub pattern: Regex,
    replace: ReplaceFn,
}

impl Rule {
    pub fn new(name: impl Into<String>, pattern: Regex, replace: ReplaceFn) -> Self {
        Self {
            name: name.into(),
            pattern,
            replace,
        }
    }

    /// A rule that always substitutes the same literal text
    pub fn literal(name: impl Into<String>, pattern: Regex, replacement: impl Into<String>) -> Self {
        let replacement = replacement.into();
        Self::new(
            name,
            pattern,
            Box::new(move |_: &Captures<'_>, _: &str, _: Range<usize>| {
                Some(replacement.clone())
            }),
        )
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

/// Text produced by a normalization pass together with the tracked caret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    pub caret: Option<usize>,
}

impl Normalized {
    pub fn new(text: impl Into<String>, caret: Option<usize>) -> Self {
        Self {
            text: text.into(),
            caret,
        }
    }
}

/// Apply `rules` in order, threading the text and caret through each one.
pub fn apply_replacements(text: &str, caret: Option<usize>, rules: &[Rule]) -> Normalized {
    let mut current = Normalized::new(text, caret);
    if text.is_empty() {
        return current;
    }

    for rule in rules {
        if let Some(next) = apply_rule(&current.text, current.caret, rule) {
            log::trace!("rule {} rewrote {:?} -> {:?}", rule.name, current.text, next.text);
            current = next;
        }
    }

    current
}

/// Run one rule over the text. Returns `None` when nothing was replaced.
fn apply_rule(text: &str, caret: Option<usize>, rule: &Rule) -> Option<Normalized> {
    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    let mut changed = false;

    // Char positions in the input text, and the caret shift accumulated so far
    let mut char_pos = 0usize;
    let mut delta: isize = 0;
    let mut caret_inside: Option<usize> = None;

    for caps in rule.pattern.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let Some(replacement) = (rule.replace)(&caps, text, whole.range()) else {
            continue;
        };
        changed = true;

        char_pos += text[last..whole.start()].chars().count();
        let start_char = char_pos;
        let match_chars = whole.as_str().chars().count();
        let end_char = start_char + match_chars;
        let replacement_chars = replacement.chars().count();

        if let Some(original) = caret {
            if end_char <= original {
                delta += replacement_chars as isize - match_chars as isize;
            } else if start_char < original && caret_inside.is_none() {
                let shifted_start = (start_char as isize + delta).max(0) as usize;
                caret_inside = Some(shifted_start + replacement_chars);
            }
        }

        result.push_str(&text[last..whole.start()]);
        result.push_str(&replacement);
        char_pos = end_char;
        last = whole.end();
    }

    if !changed {
        return None;
    }
    result.push_str(&text[last..]);

    let caret = caret.map(|original| {
        caret_inside.unwrap_or_else(|| (original as isize + delta).max(0) as usize)
    });
    Some(Normalized::new(result, caret))
}

/// Byte offset of the `char_offset`-th char, clamped to the end of `text`.
pub fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: &str, replacement: &str) -> Rule {
        Rule::literal("test", Regex::new(pattern).unwrap(), replacement)
    }

    #[test]
    fn test_replaces_all_matches() {
        let out = apply_replacements("a-b-c", None, &[rule("-", "+")]);
        assert_eq!(out, Normalized::new("a+b+c", None));
    }

    #[test]
    fn test_caret_shifts_for_edits_before_it() {
        // "ab" grows by two chars before the caret at 3
        let out = apply_replacements("ab|x", Some(3), &[rule("ab", "abcd")]);
        assert_eq!(out.text, "abcd|x");
        assert_eq!(out.caret, Some(5));
    }

    #[test]
    fn test_caret_ignores_edits_after_it() {
        let out = apply_replacements("x|ab", Some(1), &[rule("ab", "abcd")]);
        assert_eq!(out.caret, Some(1));
    }

    #[test]
    fn test_edit_starting_at_caret_is_after_it() {
        let out = apply_replacements("xab", Some(1), &[rule("ab", "abcd")]);
        assert_eq!(out.caret, Some(1));
    }

    #[test]
    fn test_caret_inside_match_moves_to_end_of_replacement() {
        let out = apply_replacements("xabcy", Some(2), &[rule("abc", "Z")]);
        assert_eq!(out.text, "xZy");
        assert_eq!(out.caret, Some(2));
    }

    #[test]
    fn test_caret_accumulates_across_matches_and_rules() {
        let rules = [rule("a", "aa"), rule("b", "")];
        // a a | b b: each a grows by one, the b after the caret vanishes
        let out = apply_replacements("aa|bb", Some(3), &rules);
        assert_eq!(out.text, "aaaa|");
        assert_eq!(out.caret, Some(5));
    }

    #[test]
    fn test_caret_counts_chars_not_bytes() {
        let out = apply_replacements("Δab", Some(3), &[rule("ab", "abc")]);
        assert_eq!(out.caret, Some(4));
    }

    #[test]
    fn test_declined_matches_are_kept() {
        let guarded = Rule::new(
            "guarded",
            Regex::new("o").unwrap(),
            Box::new(|_: &Captures<'_>, text: &str, range: Range<usize>| {
                if range.start > 0 && &text[range.start - 1..range.start] == "f" {
                    None
                } else {
                    Some("0".to_string())
                }
            }),
        );
        let out = apply_replacements("foo", Some(3), &[guarded]);
        assert_eq!(out.text, "fo0");
        assert_eq!(out.caret, Some(3));
    }

    #[test]
    fn test_byte_offset() {
        assert_eq!(byte_offset("Δx", 1), 2);
        assert_eq!(byte_offset("Δx", 9), 3);
    }
}
