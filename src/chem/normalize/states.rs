//! State annotation normalization
//!
//! Physical states arrive in many spellings depending on how they were typed:
//! as a subscript, wrapped in `\text`, preceded by a thin space, or bare. All
//! of them collapse to the inline form `(aq)`, `(s)`, `(l)`, `(g)`.

use super::replace::{apply_replacements, byte_offset, Normalized, Rule};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Range;

/// The four physical states, as written in the canonical inline form
pub const STATES: &[&str] = &["aq", "s", "l", "g"];

/// Every accepted spelling, most specific first. The bare `(x)` form comes
/// last so that wrapped spellings are consumed whole.
const STATE_SPELLINGS: &[(&str, &str)] = &[
    ("subscript-text", r"(?i)_\{\s*\\?text\{\s*\(?(aq|s|l|g)\)?\s*\}\s*\}"),
    ("subscript", r"(?i)_\{\s*\(?(aq|s|l|g)\)?\s*\}"),
    ("subscript-double-paren", r"(?i)_\(\(\s*(aq|s|l|g)\s*\)\)"),
    ("thin-space-text", r"(?i)\\,\\text\{\s*\(?(aq|s|l|g)\)?\s*\}"),
    ("mathrm", r"(?i)\\mathrm\{\s*\(?(aq|s|l|g)\)?\s*\}"),
    ("text", r"(?i)\\text\{\s*\(?(aq|s|l|g)\)?\s*\}"),
    ("bare", r"(?i)\(\s*(aq|s|l|g)\s*\)"),
];

static STATE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    STATE_SPELLINGS
        .iter()
        .map(|(name, pattern)| {
            Rule::new(
                *name,
                Regex::new(pattern).unwrap(),
                Box::new(|caps: &Captures<'_>, _: &str, _: Range<usize>| {
                    caps.get(1)
                        .map(|state| format!("({})", state.as_str().to_lowercase()))
                }),
            )
        })
        .collect()
});

// Spellings recognized by the deletion keys. The `\s*` on the bare form eats
// the separating space the keypad inserts in front of a state.
const DELETABLE: &[&str] = &[
    r"(?:\\,)?\\text\{\s*\(?(?:aq|s|l|g)\)?\s*\}",
    r"\\mathrm\{\s*\(?(?:aq|s|l|g)\)?\s*\}",
    r"_\{\\?\(?(?:aq|s|l|g)\)?\}",
    r"_\(\((?:aq|s|l|g)\)\)",
    r"\s*\((?:aq|s|l|g)\)\s*",
];

static DELETE_BEFORE: Lazy<Vec<Regex>> = Lazy::new(|| {
    DELETABLE
        .iter()
        .map(|p| Regex::new(&format!(r"(?i){}$", p)).unwrap())
        .collect()
});

static DELETE_AFTER: Lazy<Vec<Regex>> = Lazy::new(|| {
    DELETABLE
        .iter()
        .map(|p| Regex::new(&format!(r"(?i)^{}", p)).unwrap())
        .collect()
});

// Upper bound on rewrite rounds; real input settles in one or two
const MAX_PASSES: usize = 8;

/// Rewrite every state spelling into its canonical `(x)` form, tracking the caret.
///
/// Unwrapping one spelling can expose another (`_{\mathrm{(aq)}}` becomes
/// `_{(aq)}`), so the rules run until the text stops changing.
pub fn normalize_state_annotations(text: &str, caret: Option<usize>) -> Normalized {
    let mut current = apply_replacements(text, caret, &STATE_RULES);
    for _ in 1..MAX_PASSES {
        let next = apply_replacements(&current.text, current.caret, &STATE_RULES);
        if next.text == current.text {
            break;
        }
        current = next;
    }
    current
}

/// Remove a whole state annotation ending at the caret (Backspace).
///
/// Returns `None` when the text before the caret does not end in a state, in
/// which case the key should fall through to a normal single-char delete.
pub fn delete_state_before(text: &str, caret: usize) -> Option<Normalized> {
    let split = byte_offset(text, caret);
    let (before, after) = text.split_at(split);
    let found = DELETE_BEFORE.iter().find_map(|re| re.find(before))?;
    let removed = found.as_str().chars().count();

    log::debug!("backspace removes state {:?}", found.as_str());
    let mut result = String::with_capacity(text.len());
    result.push_str(&before[..found.start()]);
    result.push_str(after);
    Some(Normalized::new(result, Some(caret.min(text.chars().count()) - removed)))
}

/// Remove a whole state annotation starting at the caret (Delete).
pub fn delete_state_after(text: &str, caret: usize) -> Option<Normalized> {
    let split = byte_offset(text, caret);
    let (before, after) = text.split_at(split);
    let found = DELETE_AFTER.iter().find_map(|re| re.find(after))?;
    if found.is_empty() {
        return None;
    }

    log::debug!("delete removes state {:?}", found.as_str());
    let mut result = String::with_capacity(text.len());
    result.push_str(before);
    result.push_str(&after[found.end()..]);
    Some(Normalized::new(result, Some(before.chars().count())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_spellings_converge() {
        let inputs = [
            r"Na_{\text{(aq)}}",
            r"Na_{(aq)}",
            r"Na_{aq}",
            r"Na_((aq))",
            r"Na\,\text{(aq)}",
            r"Na\mathrm{(aq)}",
            r"Na\text{aq}",
            r"Na( aq )",
        ];
        for input in inputs {
            assert_eq!(
                normalize_state_annotations(input, None).text,
                "Na(aq)",
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_nested_spellings_unwrap_fully() {
        assert_eq!(normalize_state_annotations(r"X_{\mathrm{(aq)}}", None).text, "X(aq)");
        assert_eq!(normalize_state_annotations(r"X_(\text{g})", None).text, "X(g)");
    }

    #[test]
    fn test_state_is_lowercased() {
        assert_eq!(normalize_state_annotations("H2O(L)", None).text, "H2O(l)");
        assert_eq!(normalize_state_annotations(r"\text{(AQ)}", None).text, "(aq)");
    }

    #[test]
    fn test_non_states_are_untouched() {
        let out = normalize_state_annotations("(x) (sl) \\text{hello}", Some(4));
        assert_eq!(out, Normalized::new("(x) (sl) \\text{hello}", Some(4)));
    }

    #[test]
    fn test_caret_after_state_shifts() {
        // "Na_{(aq)}|" (9 chars) -> "Na(aq)|" (6 chars)
        let out = normalize_state_annotations("Na_{(aq)}", Some(9));
        assert_eq!(out.text, "Na(aq)");
        assert_eq!(out.caret, Some(6));
    }

    #[test]
    fn test_backspace_removes_text_state() {
        let text = r"NaCl\,\text{(s)}";
        let out = delete_state_before(text, text.chars().count()).unwrap();
        assert_eq!(out, Normalized::new("NaCl", Some(4)));
    }

    #[test]
    fn test_backspace_removes_bare_state_with_leading_space() {
        let out = delete_state_before("H_{2}O (l) + X", 10).unwrap();
        assert_eq!(out.text, "H_{2}O + X");
        assert_eq!(out.caret, Some(6));
    }

    #[test]
    fn test_backspace_without_state() {
        assert_eq!(delete_state_before("NaCl", 4), None);
        assert_eq!(delete_state_before("", 0), None);
    }

    #[test]
    fn test_delete_removes_following_state() {
        let out = delete_state_after("Na_((aq)) + Cl", 2).unwrap();
        assert_eq!(out, Normalized::new("Na + Cl", Some(2)));
    }

    #[test]
    fn test_delete_without_state() {
        assert_eq!(delete_state_after("Na + Cl", 2), None);
        assert_eq!(delete_state_after("Na", 2), None);
    }
}
