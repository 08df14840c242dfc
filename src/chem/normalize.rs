//! Ion and state normalization
//!
//! A textual pre-pass over raw markup, run before conversion and after every
//! keystroke in the live editor. It rewrites polyatomic ions into subscripted
//! markup and state annotations into their canonical `(x)` spelling while
//! carrying the caret through each edit.
//!
//! The pass is idempotent: running it on its own output changes nothing.

pub mod ions;
pub mod replace;
pub mod states;

pub use ions::{convert_polyatomic_ions, ion_markup, POLYATOMIC_IONS};
pub use replace::{apply_replacements, Normalized, Rule};
pub use states::{delete_state_after, delete_state_before, normalize_state_annotations, STATES};

/// Expand ions, then canonicalize states.
///
/// Canonicalizing a state can free an ion that was blocked by a following `_`
/// (`NO3_{aq}` becomes `NO3(aq)`), so ions get one more pass when the state
/// rewrite changed anything.
pub fn normalize_ions_and_states(text: &str, caret: Option<usize>) -> Normalized {
    let ions = convert_polyatomic_ions(text, caret);
    let states = normalize_state_annotations(&ions.text, ions.caret);
    let result = if states.text != ions.text {
        convert_polyatomic_ions(&states.text, states.caret)
    } else {
        states
    };

    if result.text != text {
        log::debug!("normalized {:?} -> {:?}", text, result.text);
    }
    result
}
