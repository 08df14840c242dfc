//! Final spacing cleanup of rendered word equations
//!
//! The renderer pads freely (operators, arrows, scripts all bring their own
//! spaces), so this pass settles the spacing once over the whole string. The
//! steps are order-sensitive.

use once_cell::sync::Lazy;
use regex::Regex;

static DOUBLED_STATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\((aq|s|l|g)\)\)").unwrap());
static SPACE_BEFORE_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\)").unwrap());
static STATE_SPACING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z0-9〗)])\s*\((aq|s|l|g)\)").unwrap());
static PLUS_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+\+[ \t]+").unwrap());
static ARROW_SPACING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+([→←↔⟷⇌⇒⇐⇔])[ \t]+").unwrap());
// `□(→┴label)`; a bare placeholder box has no arrow inside
static LABELED_ARROW_SPACING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]*(□\([→←↔⟷⇌⇒⇐⇔][^()]*\))[ \t]*").unwrap());

/// Normalize spacing around parentheses, states, operators and arrows
pub fn post_process(text: &str) -> String {
    let text = DOUBLED_STATE.replace_all(text, "(${1})");
    let text = SPACE_BEFORE_CLOSE.replace_all(&text, ")");
    let text = STATE_SPACING.replace_all(&text, "${1} (${2})");
    let text = PLUS_SPACING.replace_all(&text, " + ");
    let text = ARROW_SPACING.replace_all(&text, " ${1} ");
    let text = LABELED_ARROW_SPACING.replace_all(&text, " ${1} ");
    text.trim().to_string()
}
