//! Parser module for chemistry markup
//!
//! Turns the flat token stream into an expression tree. Scripts attach to the
//! preceding atom, prefix scripts in front of an element become an isotope,
//! and command arguments stay raw until the renderer needs them.

pub mod ast;
pub mod ast_treeviz;
#[allow(clippy::module_inception)]
pub mod parser;

pub use ast::{ExpressionNode, NodeKind};
pub use ast_treeviz::to_treeviz_str;
pub use parser::{parse, parse_at_depth, MAX_NESTING};

use crate::chem::lexer::tokenize;

/// Tokenize and parse in one step
pub fn parse_markup(source: &str) -> ExpressionNode {
    parse_markup_at_depth(source, 0)
}

/// Tokenize and parse markup nested `depth` levels deep
pub fn parse_markup_at_depth(source: &str, depth: usize) -> ExpressionNode {
    let tokens = tokenize(source);
    log::trace!("parsing {} tokens at depth {}", tokens.len(), depth);
    parse_at_depth(&tokens, depth)
}
