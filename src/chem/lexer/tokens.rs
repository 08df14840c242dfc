//! Token definitions for chemistry markup
//!
//! This module defines all the tokens that can be produced by the markup lexer.
//! The tokens are defined using the logos derive macro for efficient tokenization.
//! Commands are the only tokens that need custom lexing: their brace arguments
//! are captured raw by a callback so that each command can decide later how to
//! interpret them (a fraction parses both, `\text` keeps its argument verbatim).
use logos::{Lexer, Logos};
use serde::Serialize;
use std::fmt;

/// Commands whose `[...]` argument is captured as an optional argument.
///
/// Everything else leaves a following `[` alone, so `\left[` keeps its bracket.
const OPTIONAL_ARG_COMMANDS: &[&str] = &["sqrt", "xrightarrow", "xleftarrow", "xleftrightarrow"];

/// A backslash command together with its raw, unparsed arguments
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct CommandToken {
    pub name: String,
    pub optional: Option<String>,
    pub args: Vec<String>,
}

impl CommandToken {
    pub fn bare(name: &str) -> Self {
        Self {
            name: name.to_string(),
            optional: None,
            args: Vec::new(),
        }
    }

    pub fn with_args(name: &str, args: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            optional: None,
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }
}

/// All possible tokens in chemistry markup
#[derive(Logos, Debug, PartialEq, Eq, Clone, Serialize)]
#[logos(skip r"\s+")]
pub enum Token {
    // Commands: named, spacing, line break
    #[regex(r"\\[A-Za-z]+", lex_command)]
    #[regex(r"\\[,;:! ]", lex_spacing_command)]
    #[token(r"\\", |_| CommandToken::bare("\\"))]
    Command(CommandToken),

    // Grouping and scripts
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("_")]
    Subscript,
    #[token("^")]
    Superscript,
    #[token("+")]
    Plus,
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,

    #[regex(r"[0-9]+", |lex| lex.slice().to_string(), priority = 3)]
    Number(String),

    // Chemistry element shape only: lowercase runs stay plain characters
    #[regex(r"[A-Z][a-z]?", |lex| lex.slice().to_string(), priority = 3)]
    Element(String),

    // Glyphs the editor may already have rendered
    #[regex(r"[Α-Ωα-ωϑϕϵ→←↔⟷⇌⇒⇐⇔↑↓±∓×·÷≈≠≤≥∞□]", first_char, priority = 3)]
    Symbol(char),

    // Escaped punctuation and the catch-all
    #[regex(r"\\[{}_%#&$]", |lex| lex.slice().chars().nth(1))]
    #[regex(r"[^\s]", first_char, priority = 1)]
    Char(char),
}

fn first_char(lex: &mut Lexer<Token>) -> Option<char> {
    lex.slice().chars().next()
}

fn lex_spacing_command(lex: &mut Lexer<Token>) -> CommandToken {
    CommandToken::bare(&lex.slice()[1..])
}

fn lex_command(lex: &mut Lexer<Token>) -> CommandToken {
    let mut command = CommandToken::bare(&lex.slice()[1..]);

    if OPTIONAL_ARG_COMMANDS.contains(&command.name.as_str()) {
        if let Some((raw, consumed)) = scan_delimited(lex.remainder(), '[', ']') {
            command.optional = Some(raw);
            lex.bump(consumed);
        }
    }

    while let Some((raw, consumed)) = scan_delimited(lex.remainder(), '{', '}') {
        command.args.push(raw);
        lex.bump(consumed);
    }

    command
}

/// Scan one delimited argument at the start of `source`.
///
/// Returns the raw interior and the number of bytes consumed. An unterminated
/// argument swallows the rest of the input.
fn scan_delimited(source: &str, open: char, close: char) -> Option<(String, usize)> {
    let mut chars = source.char_indices();
    match chars.next() {
        Some((_, c)) if c == open => {}
        _ => return None,
    }

    let body_start = open.len_utf8();
    let mut depth = 1usize;
    let mut escaped = false;
    for (idx, c) in chars {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some((source[body_start..idx].to_string(), idx + close.len_utf8()));
            }
        }
    }

    Some((source[body_start..].to_string(), source.len()))
}

impl Token {
    /// Check if this token starts a sub- or superscript
    pub fn is_script_marker(&self) -> bool {
        matches!(self, Token::Subscript | Token::Superscript)
    }

    /// Check if this token is an element symbol
    pub fn is_element(&self) -> bool {
        matches!(self, Token::Element(_))
    }

    /// Check if this token is a command
    pub fn is_command(&self) -> bool {
        matches!(self, Token::Command(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Command(command) => {
                write!(f, "Command({})", command.name)?;
                if let Some(optional) = &command.optional {
                    write!(f, "[{}]", optional)?;
                }
                for arg in &command.args {
                    write!(f, "{{{}}}", arg)?;
                }
                Ok(())
            }
            Token::BraceOpen => write!(f, "BraceOpen"),
            Token::BraceClose => write!(f, "BraceClose"),
            Token::Subscript => write!(f, "Subscript"),
            Token::Superscript => write!(f, "Superscript"),
            Token::Plus => write!(f, "Plus"),
            Token::ParenOpen => write!(f, "ParenOpen"),
            Token::ParenClose => write!(f, "ParenClose"),
            Token::Number(digits) => write!(f, "Number({})", digits),
            Token::Element(symbol) => write!(f, "Element({})", symbol),
            Token::Symbol(c) => write!(f, "Symbol({})", c),
            Token::Char(c) => write!(f, "Char({})", c),
        }
    }
}
