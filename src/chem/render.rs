//! Renderer module for word-equation output
//!
//! Walks an expression tree and produces linear word-equation text. Node
//! kinds are handled in [`word`]; backslash commands go through the dispatch
//! table in [`commands`].

pub mod commands;
pub mod word;

pub use commands::{lookup, render_command, CommandRule};
pub use word::{render, RenderContext};
