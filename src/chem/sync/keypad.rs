//! Chemistry keypad and key-driven insertions

use once_cell::sync::Lazy;
use regex::Regex;

/// One keypad button: what it shows and what it inserts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChemKey {
    pub display: &'static str,
    pub insert: &'static str,
}

const fn key(display: &'static str, insert: &'static str) -> ChemKey {
    ChemKey { display, insert }
}

/// The keypad, in button order
pub const CHEM_KEYS: &[ChemKey] = &[
    key(r"\rightarrow", r" \rightarrow "),
    key(r"\rightleftharpoons", r" \rightleftharpoons "),
    key(r"\xrightarrow{\placeholder{}}", r" \xrightarrow{\placeholder{}\!} "),
    key("(s)", " (s)"),
    key("(l)", " (l)"),
    key("(g)", " (g)"),
    key("(aq)", " (aq)"),
    key(
        r"{\placeholder{}}^{\placeholder{}}(aq)",
        r"{\placeholder{}\!}^{\placeholder{}} (aq)",
    ),
    key(
        r"{\placeholder{}}^{\placeholder{}}",
        r"{\placeholder{}\!}^{\placeholder{}}",
    ),
    key(r"\xrightarrow{\Delta}", r" \xrightarrow{\Delta} "),
    key(
        r"^{\placeholder{}}_{\placeholder{}}\placeholder{}",
        r"^{\placeholder{}}_{\placeholder{}}\placeholder{}",
    ),
    key(r"\alpha", r"\alpha"),
    key(r"\beta", r"\beta"),
    key(r"\gamma", r"\gamma"),
    key(r"\overline{\beta}\:", r"\overline{\beta}\:"),
];

const SUPERSCRIPT_SLOT: &str = r"^{\placeholder{}}";
const SUBSCRIPT_SLOT: &str = r"_{\placeholder{}}";

static NUMERIC_SUBSCRIPT_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"_\{\d+\}$").unwrap());

/// Text to insert for a state button: ` (aq)`, ` (s)`, ...
pub fn state_insertion(state: &str) -> String {
    format!(" ({})", state.trim().to_lowercase())
}

/// What a key press inserts instead of its own character, if anything.
///
/// `^` and `_` open a script slot so typing stays inside it. A letter typed
/// right after a numeric subscript (`H_{2}|`) opens a superscript first.
pub fn key_insertion(markup_before_cursor: &str, key: char) -> Option<String> {
    match key {
        '^' => Some(SUPERSCRIPT_SLOT.to_string()),
        '_' => Some(SUBSCRIPT_SLOT.to_string()),
        c if c.is_ascii_alphabetic() && NUMERIC_SUBSCRIPT_END.is_match(markup_before_cursor) => {
            Some(format!("{}{}", SUPERSCRIPT_SLOT, c))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_keys_open_slots() {
        assert_eq!(key_insertion("", '^').as_deref(), Some(r"^{\placeholder{}}"));
        assert_eq!(key_insertion("Na", '_').as_deref(), Some(r"_{\placeholder{}}"));
    }

    #[test]
    fn test_letter_after_numeric_subscript() {
        assert_eq!(
            key_insertion("SO_{4}", 'x').as_deref(),
            Some(r"^{\placeholder{}}x")
        );
        assert_eq!(key_insertion("SO_{x}", 'a'), None);
        assert_eq!(key_insertion("SO_{4}", '2'), None);
        assert_eq!(key_insertion("Na", 'C'), None);
    }

    #[test]
    fn test_state_insertion() {
        assert_eq!(state_insertion("AQ"), " (aq)");
        assert_eq!(state_insertion("s"), " (s)");
    }

    #[test]
    fn test_keypad_states_match_state_insertion() {
        for state in crate::chem::normalize::STATES {
            let display = format!("({})", state);
            let key = CHEM_KEYS.iter().find(|k| k.display == display).unwrap();
            assert_eq!(key.insert, state_insertion(state));
        }
    }
}
