//! Keeping the live editor, its plain-text mirror and the word equation in step
//!
//! The editor widget itself lives outside this crate and is reached through
//! [`MathEditor`]. Every change coming from it is normalized, written back if
//! normalization changed anything, and converted. The write-back raises a
//! change event of its own; callers pass it in as
//! [`UpdateOrigin::Programmatic`] and it is ignored, which breaks the loop.

pub mod keypad;

pub use keypad::{key_insertion, state_insertion, ChemKey, CHEM_KEYS};

use crate::chem::normalize::{
    apply_replacements, delete_state_after, delete_state_before, Normalized, Rule,
};
use crate::chem::pipeline::{markup_for_display, Converter};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Range;

/// Who changed the editor contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOrigin {
    /// Typing, pasting, keypad buttons
    User,
    /// Our own write-back of normalized markup
    Programmatic,
}

/// The slice of an equation editor the sync logic needs
pub trait MathEditor {
    fn value(&self) -> String;
    fn set_value(&mut self, value: &str);
    fn insert(&mut self, text: &str);
}

/// Keys with state-aware deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteKey {
    Backspace,
    Delete,
}

/// Result of syncing from the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// The normalized markup, now the source of truth
    pub markup: String,
    /// Markup to push back into the editor, when normalization changed it
    pub write_back: Option<String>,
    /// Markup for the preview and the text mirror
    pub display: String,
    pub word: String,
}

/// Result of syncing from the plain-text mirror
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSyncOutcome {
    pub text: String,
    pub caret: Option<usize>,
    pub display: String,
    pub word: String,
}

// A bare element symbol directly in front of a script marker
static ELEMENT_CANDIDATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z][a-z]?").unwrap());

static BRACE_SCRIPTED_ELEMENTS: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![Rule::new(
        "brace-scripted-element",
        ELEMENT_CANDIDATE.clone(),
        Box::new(|caps: &Captures<'_>, text: &str, range: Range<usize>| {
            let next = text[range.end..].chars().next();
            if matches!(next, Some('_') | Some('^')) {
                Some(format!("{{{}}}", &caps[0]))
            } else {
                None
            }
        }),
    )]
});

/// Editor synchronization state: the last markup that was synchronized
#[derive(Debug, Clone, Default)]
pub struct EditorSync {
    converter: Converter,
    last_markup: String,
}

impl EditorSync {
    pub fn new(converter: Converter) -> Self {
        Self {
            converter,
            last_markup: String::new(),
        }
    }

    pub fn last_markup(&self) -> &str {
        &self.last_markup
    }

    /// The editor's markup changed. Programmatic changes are our own echo and
    /// produce nothing.
    pub fn sync_from_markup(&mut self, value: &str, origin: UpdateOrigin) -> Option<SyncOutcome> {
        if origin == UpdateOrigin::Programmatic {
            log::trace!("ignoring programmatic update");
            return None;
        }

        let markup = self.converter.normalize(value);
        let write_back = (markup != value).then(|| markup.clone());
        let display = markup_for_display(&markup);
        let word = self.converter.convert(&markup);
        self.last_markup = markup.clone();

        Some(SyncOutcome {
            markup,
            write_back,
            display,
            word,
        })
    }

    /// The plain-text mirror changed. Normalizes with the caret, then braces
    /// bare elements in front of scripts (`Ca_2` -> `{Ca}_2`).
    pub fn sync_from_text(&mut self, text: &str, caret: Option<usize>) -> TextSyncOutcome {
        let normalized = self.normalize_with_caret(text, caret);
        let wrapped = apply_replacements(&normalized.text, normalized.caret, &BRACE_SCRIPTED_ELEMENTS);

        let display = markup_for_display(&wrapped.text);
        let word = self.converter.convert(&wrapped.text);
        self.last_markup = wrapped.text.clone();

        TextSyncOutcome {
            text: wrapped.text,
            caret: wrapped.caret,
            display,
            word,
        }
    }

    /// Pull the editor's value, normalize it and write the result back.
    ///
    /// A widget that reports the write as a change event should route it to
    /// [`EditorSync::sync_from_markup`] as [`UpdateOrigin::Programmatic`].
    pub fn sync_editor(&mut self, editor: &mut impl MathEditor) -> Option<SyncOutcome> {
        let value = editor.value();
        let outcome = self.sync_from_markup(&value, UpdateOrigin::User)?;
        if let Some(markup) = &outcome.write_back {
            editor.set_value(markup);
        }
        Some(outcome)
    }

    /// Insert text at the editor's cursor and resync (keypad buttons)
    pub fn insert(&mut self, editor: &mut impl MathEditor, text: &str) -> Option<SyncOutcome> {
        editor.insert(text);
        self.sync_editor(editor)
    }

    /// Insert a state annotation such as ` (aq)` and resync
    pub fn apply_state(&mut self, editor: &mut impl MathEditor, state: &str) -> Option<SyncOutcome> {
        self.insert(editor, &state_insertion(state))
    }

    /// Remove a whole state annotation next to the caret. `None` means the key
    /// should do its usual single-char deletion.
    pub fn delete_state(&self, text: &str, caret: usize, key: DeleteKey) -> Option<Normalized> {
        match key {
            DeleteKey::Backspace => delete_state_before(text, caret),
            DeleteKey::Delete => delete_state_after(text, caret),
        }
    }

    fn normalize_with_caret(&self, text: &str, caret: Option<usize>) -> Normalized {
        use crate::chem::normalize::{
            convert_polyatomic_ions, normalize_ions_and_states, normalize_state_annotations,
        };
        let options = self.converter.options();
        match (options.expand_ions, options.normalize_states) {
            (true, true) => normalize_ions_and_states(text, caret),
            (true, false) => convert_polyatomic_ions(text, caret),
            (false, true) => normalize_state_annotations(text, caret),
            (false, false) => Normalized::new(text, caret),
        }
    }
}
