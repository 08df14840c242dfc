//! Lexer module for chemistry markup
//!
//! This module contains the tokenization logic for the markup accepted from the
//! equation editor, including token definitions and the lexer implementation.
//!
//! Only the chemistry-relevant slice of LaTeX is recognized. Commands keep their
//! brace arguments as raw strings; the parser stores them untouched and the
//! renderer decides per command how to read them.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{tokenize, tokenize_with_spans};
pub use tokens::{CommandToken, Token};
