//! Chemistry markup conversion
//!
//! Markup typed into an equation editor (a chemistry-sized slice of LaTeX) is
//! turned into two things: canonical markup for re-display, and a linear
//! "word equation" a word processor's equation field accepts.
//!
//! ```text
//! markup -> normalize -> lexer -> parser -> render -> postprocess -> word equation
//! ```
//!
//! Around that core sit the editor synchronization helpers ([`sync`]), the
//! stage inspector used by the CLI ([`processor`]) and configuration
//! ([`config`]).

pub mod config;
pub mod lexer;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod postprocess;
pub mod processor;
pub mod render;
pub mod sync;
pub mod testing;

pub use normalize::{normalize_ions_and_states, Normalized};
pub use pipeline::{convert_to_word_equation, markup_for_display, ConvertOptions, Converter};
