//! End-to-end conversion from markup to word equation
//!
//! ```text
//! markup -> normalize -> tokenize -> parse -> render -> post_process
//! ```
//!
//! Every stage is total, so conversion never fails: the worst outcome of a
//! half-typed equation is an imperfect rendering.

use crate::chem::normalize::{
    convert_polyatomic_ions, normalize_ions_and_states, normalize_state_annotations,
};
use crate::chem::parser::parse_markup;
use crate::chem::postprocess::post_process;
use crate::chem::render::{render, RenderContext};
use serde::{Deserialize, Serialize};

/// Toggles for the optional stages of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Expand bare polyatomic ions (`SO4` -> `SO_{4}`) before parsing
    pub expand_ions: bool,
    /// Canonicalize state annotations before parsing
    pub normalize_states: bool,
    /// Wrap multi-letter element symbols in `〖..〗`
    pub bracket_multi_letter: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            expand_ions: true,
            normalize_states: true,
            bracket_multi_letter: true,
        }
    }
}

/// A configured markup-to-word-equation converter
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Run the enabled normalizer passes
    pub fn normalize(&self, markup: &str) -> String {
        match (self.options.expand_ions, self.options.normalize_states) {
            (true, true) => normalize_ions_and_states(markup, None).text,
            (true, false) => convert_polyatomic_ions(markup, None).text,
            (false, true) => normalize_state_annotations(markup, None).text,
            (false, false) => markup.to_string(),
        }
    }

    pub fn convert(&self, markup: &str) -> String {
        if markup.trim().is_empty() {
            return String::new();
        }

        let normalized = self.normalize(markup);
        let tree = parse_markup(&normalized);
        let rendered = render(&tree, RenderContext::new(self.options.bracket_multi_letter));
        let word = post_process(&rendered);
        log::debug!("converted {:?} -> {:?}", markup, word);
        word
    }
}

/// Convert markup to a word equation with the default options
pub fn convert_to_word_equation(markup: &str) -> String {
    Converter::default().convert(markup)
}

/// Markup as shown in the preview and copied to the clipboard: the editor's
/// negative thin spaces (`\!`) are dropped.
pub fn markup_for_display(markup: &str) -> String {
    markup.replace(r"\!", "")
}
