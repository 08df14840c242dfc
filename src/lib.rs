//! # chemtyper
//!
//! Converts chemistry equation markup into normalized markup and Word linear
//! equations.
//!
//! ## Testing
//!
//! Tree assertions for parser tests live in the [testing module](chem::testing).

pub mod chem;

pub use chem::{
    convert_to_word_equation, markup_for_display, normalize_ions_and_states, ConvertOptions,
    Converter, Normalized,
};
