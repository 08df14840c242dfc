//! Polyatomic ion expansion
//!
//! Users type ions the way they read them (`SO4`, `NH4`). The editor wants the
//! subscripted markup (`SO_{4}`), so every known ion is expanded in place,
//! either inside parentheses or as a standalone token.

use super::replace::{apply_replacements, Normalized, Rule};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Range;

/// Common polyatomic ions and their subscripted markup
pub const POLYATOMIC_IONS: &[(&str, &str)] = &[
    ("NH4", "NH_{4}"),
    ("SO4", "SO_{4}"),
    ("SO3", "SO_{3}"),
    ("NO3", "NO_{3}"),
    ("NO2", "NO_{2}"),
    ("CO3", "CO_{3}"),
    ("PO4", "PO_{4}"),
    ("ClO3", "ClO_{3}"),
    ("ClO4", "ClO_{4}"),
    ("MnO4", "MnO_{4}"),
    ("CrO4", "CrO_{4}"),
    ("Cr2O7", "Cr_{2}O_{7}"),
    ("OH", "OH"),
    ("CN", "CN"),
    ("HCO3", "HCO_{3}"),
    ("HSO4", "HSO_{4}"),
    ("H2PO4", "H_{2}PO_{4}"),
    ("HPO4", "HPO_{4}"),
    ("C2H3O2", "C_{2}H_{3}O_{2}"),
    ("CH3COO", "CH_{3}COO"),
];

/// Look up the subscripted markup for a plain ion formula
pub fn ion_markup(formula: &str) -> Option<&'static str> {
    POLYATOMIC_IONS
        .iter()
        .find(|(plain, _)| *plain == formula)
        .map(|(_, markup)| *markup)
}

/// Expansion rules, longest ion first so `H2PO4` is not pre-empted by `PO4`.
static ION_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let mut ions: Vec<&(&str, &str)> = POLYATOMIC_IONS
        .iter()
        .filter(|(plain, markup)| plain != markup)
        .collect();
    ions.sort_by_key(|(plain, _)| std::cmp::Reverse(plain.len()));

    let mut rules = Vec::with_capacity(ions.len() * 2);
    for (plain, markup) in ions {
        let escaped = regex::escape(plain);
        rules.push(Rule::literal(
            format!("{}-parenthesized", plain),
            Regex::new(&format!(r"\({}\)", escaped)).unwrap(),
            format!("({})", markup),
        ));

        let markup = markup.to_string();
        rules.push(Rule::new(
            format!("{}-standalone", plain),
            Regex::new(&escaped).unwrap(),
            Box::new(move |_: &Captures<'_>, text: &str, range: Range<usize>| {
                if is_standalone(text, range) {
                    Some(markup.clone())
                } else {
                    None
                }
            }),
        ));
    }
    rules
});

/// An ion occurrence is standalone when it is not already subscripted (no `_`
/// before it) and does not run into a longer species or an argument (no letter,
/// `_` or `{` after it).
fn is_standalone(text: &str, range: Range<usize>) -> bool {
    let preceded_by_underscore = text[..range.start].ends_with('_');
    let followed_by_continuation = text[range.end..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '{');
    !preceded_by_underscore && !followed_by_continuation
}

/// Expand bare polyatomic ion names into subscripted markup, tracking the caret.
pub fn convert_polyatomic_ions(text: &str, caret: Option<usize>) -> Normalized {
    apply_replacements(text, caret, &ION_RULES)
}
